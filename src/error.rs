use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Failures surfaced by the relay endpoints.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or malformed request parameter, the caller can fix it.
    #[error("{0}")]
    InvalidInput(String),

    /// Provider unreachable, timed out, or answered with an error.
    #[error("places provider request failed: {0}")]
    Upstream(String),

    /// Server is missing a credential, the operator has to fix it.
    #[error("{0}")]
    Configuration(String),
}

impl RelayError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        RelayError::InvalidInput(message.into())
    }

    pub fn upstream(reason: impl Into<String>) -> Self {
        RelayError::Upstream(reason.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) | RelayError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RelayError::InvalidInput(_) => "invalid_input",
            RelayError::Upstream(_) => "upstream_error",
            RelayError::Configuration(_) => "configuration_error",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RelayError::upstream(format!("timed out: {}", e))
        } else {
            RelayError::upstream(e.to_string())
        }
    }
}

/// JSON body of every error response.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let message = match &self {
            RelayError::Upstream(reason) => {
                warn!("Places provider call failed due to: {}", reason);
                "Failed to retrieve places from the provider, please try again.".to_string()
            }
            RelayError::Configuration(reason) => {
                warn!("Relay is misconfigured: {}", reason);
                reason.clone()
            }
            RelayError::InvalidInput(reason) => reason.clone(),
        };

        (self.status_code(), Json(ErrorBody::new(message, self.code()))).into_response()
    }
}

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use crate::error::ErrorBody;
use crate::models::place::{Place, PlaceDetails};
use crate::models::search::SearchCriteria;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    InvalidCriteria(String),

    #[error("relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("relay answered {status}: {message}")]
    Status {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },
}

#[async_trait]
pub trait PlacesRelay: Send + Sync {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Place>, ClientError>;

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, ClientError>;

    async fn provider_key(&self) -> Result<String, ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpRelay {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct PlacesEnvelope {
    places: Vec<Place>,
}

#[derive(Deserialize)]
struct KeyEnvelope {
    #[serde(rename = "apiKey")]
    api_key: String,
}

impl HttpRelay {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, ClientError> {
        let response = self.http_client
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Relay errors carry a JSON body, anything else is reported by status alone.
        let text = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (Some(body.code), body.message),
            Err(_) => (None, text),
        };
        debug!("Relay call to {} failed with {}: {}", path, status, message);
        Err(ClientError::Status { status, code, message })
    }
}

#[async_trait]
impl PlacesRelay for HttpRelay {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Place>, ClientError> {
        let params = [
            ("activity", criteria.activity.clone()),
            ("radius", criteria.radius.meters().to_string()),
        ];
        let envelope: PlacesEnvelope = self.get("/api/search", &params).await?.json().await?;
        Ok(envelope.places)
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, ClientError> {
        let params = [("place_id", place_id.to_string())];
        Ok(self.get("/api/details", &params).await?.json().await?)
    }

    async fn provider_key(&self) -> Result<String, ClientError> {
        let envelope: KeyEnvelope = self.get("/api/key", &[]).await?.json().await?;
        Ok(envelope.api_key)
    }
}

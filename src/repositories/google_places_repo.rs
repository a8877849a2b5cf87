use anyhow::Context;
use serde_json::Value;
use tracing::{debug, warn};
use crate::config::Config;
use crate::error::RelayError;
use crate::models::place::{Location, DETAIL_FIELDS};

/// Largest radius the nearby search endpoint accepts.
pub const MAX_RADIUS_METERS: u32 = 50_000;

/// Provider statuses that carry a usable payload.
const SUCCESS_STATUSES: [&str; 2] = ["OK", "ZERO_RESULTS"];

pub struct GooglePlacesRepo {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    origin: Location,
}

impl GooglePlacesRepo {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        origin: Location,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            origin,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .build()
            .context("Failed to build the places provider HTTP client")?;

        Ok(Self::new(
            http_client,
            config.places_base_url.clone(),
            config.api_key.clone(),
            config.search_origin(),
        ))
    }

    /// Nearby search around the configured origin. The provider's result
    /// list is returned as-is.
    pub async fn nearby_search(
        &self,
        activity: &str,
        radius_meters: u32,
    ) -> Result<Vec<Value>, RelayError> {
        // Surrounding whitespace is not part of the keyword: it is stripped
        // before validation and before the provider sees it.
        let keyword = activity.trim();
        if keyword.is_empty() {
            return Err(RelayError::invalid_input("Please specify an activity and a radius."));
        }
        if radius_meters == 0 || radius_meters > MAX_RADIUS_METERS {
            return Err(RelayError::invalid_input(format!(
                "Radius must be between 1 and {} meters.",
                MAX_RADIUS_METERS
            )));
        }

        debug!("Searching places for '{}' within {}m", keyword, radius_meters);
        let params = vec![
            ("location", format!("{},{}", self.origin.lat, self.origin.lng)),
            ("radius", radius_meters.to_string()),
            ("keyword", keyword.to_string()),
        ];
        let mut body = self.get_json("nearbysearch/json", params).await?;

        match body.get_mut("results").map(Value::take) {
            Some(Value::Array(places)) => Ok(places),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(RelayError::upstream(format!(
                "expected a result list, got: {}",
                other
            ))),
        }
    }

    pub async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<Value, RelayError> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(RelayError::invalid_input("Please specify a place_id."));
        }

        debug!("Retrieving details for place {}", place_id);
        let params = vec![
            ("place_id", place_id.to_string()),
            ("fields", DETAIL_FIELDS.join(",")),
        ];
        let mut body = self.get_json("details/json", params).await?;

        match body.get_mut("result").map(Value::take) {
            Some(details @ Value::Object(_)) => Ok(details),
            _ => Err(RelayError::upstream(format!(
                "no detail object returned for place {}",
                place_id
            ))),
        }
    }

    async fn get_json(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<Value, RelayError> {
        if let Some(api_key) = &self.api_key {
            params.push(("key", api_key.clone()));
        }

        let response = self.http_client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::upstream(format!(
                "{} answered with HTTP {}",
                endpoint, status
            )));
        }

        let body: Value = response.json().await?;
        if let Some(provider_status) = body.get("status").and_then(Value::as_str) {
            if !SUCCESS_STATUSES.contains(&provider_status) {
                let reason = body
                    .get("error_message")
                    .and_then(Value::as_str)
                    .unwrap_or("no error message");
                warn!("{} returned provider status {}", endpoint, provider_status);
                return Err(RelayError::upstream(format!("{}: {}", provider_status, reason)));
            }
        }
        Ok(body)
    }
}

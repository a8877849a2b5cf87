use std::sync::Arc;
use axum::{Extension, Json, Router};
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, NoneAsEmptyString};
use tracing::{info, warn};
use crate::controller::AppState;
use crate::error::RelayError;
use crate::repositories::google_places_repo::GooglePlacesRepo;

/// Key handed to the map widget, `None` when the relay has none configured.
#[derive(Clone, Debug)]
pub struct ClientKey(pub Option<String>);

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/search", get(search_places))
        .route("/details", get(retrieve_place_details))
        .route("/key", get(retrieve_provider_key))
        .route_layer(Extension(app_state.places_repo))
        .route_layer(Extension(ClientKey(app_state.client_key)))
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchPlacesParam {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub activity: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub radius: Option<u32>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchPlacesResponse {
    pub places: Vec<Value>,
}

pub async fn search_places(
    Extension(places_repo): Extension<Arc<GooglePlacesRepo>>,
    query: Result<Query<SearchPlacesParam>, QueryRejection>,
) -> Result<Json<SearchPlacesResponse>, RelayError> {
    let Query(query) = query.map_err(|rejection| {
        RelayError::invalid_input(format!("Invalid search parameters: {}", rejection))
    })?;

    let (activity, radius) = match (query.activity, query.radius) {
        (Some(activity), Some(radius)) => (activity, radius),
        _ => return Err(RelayError::invalid_input("Please specify an activity and a radius.")),
    };

    let places = places_repo
        .nearby_search(&activity, radius)
        .await?;
    info!("Relayed {} places for '{}' within {}m", places.len(), activity.trim(), radius);

    Ok(Json(SearchPlacesResponse { places }))
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlaceDetailsParam {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub place_id: Option<String>,
}

pub async fn retrieve_place_details(
    Extension(places_repo): Extension<Arc<GooglePlacesRepo>>,
    query: Result<Query<PlaceDetailsParam>, QueryRejection>,
) -> Result<Json<Value>, RelayError> {
    let Query(query) = query.map_err(|rejection| {
        RelayError::invalid_input(format!("Invalid details parameters: {}", rejection))
    })?;
    let place_id = query
        .place_id
        .ok_or_else(|| RelayError::invalid_input("Please specify a place_id."))?;

    let details = places_repo
        .place_details(&place_id)
        .await?;

    Ok(Json(details))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ProviderKeyResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

pub async fn retrieve_provider_key(
    Extension(ClientKey(client_key)): Extension<ClientKey>,
) -> Result<Json<ProviderKeyResponse>, RelayError> {
    match client_key {
        Some(api_key) => Ok(Json(ProviderKeyResponse { api_key })),
        None => {
            warn!("Map key requested but no provider key is configured");
            Err(RelayError::Configuration(
                "No places provider key is configured on the server.".to_string(),
            ))
        }
    }
}

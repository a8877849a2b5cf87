use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;
use crate::repositories::google_places_repo::GooglePlacesRepo;

pub mod health_check;
pub mod places_controller;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub places_repo: Arc<GooglePlacesRepo>,
    pub client_key: Option<String>,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if config.api_key.is_none() {
            warn!("API_KEY is not set, every provider call will be rejected upstream");
        }
        if config.browser_api_key.is_none() && config.api_key.is_some() {
            warn!("BROWSER_API_KEY is not set, /api/key will hand out the server credential");
        }

        Ok(Self {
            places_repo: Arc::new(GooglePlacesRepo::from_config(config)?),
            client_key: config.client_key().map(str::to_string),
        })
    }
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let app_state = AppState::from_config(config)?;
    let application = build_application(app_state, config)?;

    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid listening host: {}", config.host))?;
    let address = SocketAddr::new(host, config.port);
    info!("API server listening on: {}", address);
    axum::Server::bind(&address)
        .serve(application.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error spinning up the API server")
}

pub fn build_application(
    app_state: AppState,
    config: &Config,
) -> anyhow::Result<Router> {
    let origins = config
        .allowed_origins()
        .into_iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<HeaderValue>>>()?;

    Ok(router_endpoints(app_state)
        .fallback(page_not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::OPTIONS])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
        ))
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router()
        .nest("/api", places_controller::router(app_state))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for the shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, draining connections");
}

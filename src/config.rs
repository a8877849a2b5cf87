use std::time::Duration;
use clap::Parser;
use crate::models::place::{Location, DEFAULT_SEARCH_ORIGIN};

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    /// Server-side Google Places credential, never sent to callers unless
    /// no browser key is configured.
    #[clap(env, long)]
    pub api_key: Option<String>,

    /// Referrer-restricted key handed out by `/api/key` for the map widget.
    #[clap(env, long)]
    pub browser_api_key: Option<String>,

    #[clap(env, long, default_value = "127.0.0.1")]
    pub host: String,

    #[clap(env, long, default_value_t = 5000)]
    pub port: u16,

    /// Comma separated CORS allow-list.
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    #[clap(env, long, default_value_t = DEFAULT_SEARCH_ORIGIN.lat)]
    pub search_origin_lat: f64,

    #[clap(env, long, default_value_t = DEFAULT_SEARCH_ORIGIN.lng)]
    pub search_origin_lng: f64,

    #[clap(env, long, default_value = "https://maps.googleapis.com/maps/api/place")]
    pub places_base_url: String,

    #[clap(env, long, default_value_t = 10)]
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn search_origin(&self) -> Location {
        Location {
            lat: self.search_origin_lat,
            lng: self.search_origin_lng,
        }
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Key served to the map widget, preferring the browser-scoped one.
    pub fn client_key(&self) -> Option<&str> {
        [self.browser_api_key.as_deref(), self.api_key.as_deref()]
            .into_iter()
            .flatten()
            .find(|key| !key.trim().is_empty())
    }

    pub fn allowed_origins(&self) -> Vec<&str> {
        self.origin_urls
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

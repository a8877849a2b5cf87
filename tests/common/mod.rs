#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use nearby_relay::config::Config;
use nearby_relay::controller::{build_application, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";
pub const NEARBY_PATH: &str = "/maps/api/place/nearbysearch/json";
pub const DETAILS_PATH: &str = "/maps/api/place/details/json";

pub fn config(server: &MockServer) -> Config {
    Config {
        environment: "test".to_string(),
        api_key: Some(TEST_KEY.to_string()),
        browser_api_key: None,
        host: "127.0.0.1".to_string(),
        port: 0,
        origin_urls: "http://localhost:3000".to_string(),
        search_origin_lat: 43.6108,
        search_origin_lng: 3.8767,
        places_base_url: format!("{}/maps/api/place", server.uri()),
        upstream_timeout_secs: 1,
    }
}

pub fn application(config: &Config) -> Router {
    build_application(AppState::from_config(config).unwrap(), config).unwrap()
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Relay bound to an ephemeral port, returns its base URL.
pub async fn spawn_relay(config: &Config) -> String {
    let app = application(config);
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    format!("http://{}", address)
}

pub fn provider_place(index: usize, rating: Option<f64>) -> Value {
    let mut place = json!({
        "place_id": format!("place-{}", index),
        "name": format!("Restaurant {}", index),
        "vicinity": "Rue de l'Aiguillerie, Montpellier",
        "geometry": { "location": { "lat": 43.61 + index as f64 / 1000.0, "lng": 3.87 } },
        "opening_hours": { "open_now": index % 2 == 0 },
        "business_status": "OPERATIONAL",
        "types": ["restaurant", "food", "point_of_interest"]
    });
    if let Some(rating) = rating {
        place["rating"] = json!(rating);
        place["user_ratings_total"] = json!(100 + index);
    }
    place
}

pub fn nearby_body(places: Vec<Value>) -> Value {
    json!({
        "html_attributions": [],
        "results": places,
        "status": "OK"
    })
}

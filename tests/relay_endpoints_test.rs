// Relay endpoints against a wiremock stand-in for the places provider.

mod common;

use std::time::Duration;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;
use nearby_relay::models::place::DETAIL_FIELDS;

// ── Search ──────────────────────────────────────────────────────────

#[tokio::test]
async fn search_forwards_parameters_and_origin_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("location", "43.6108,3.8767"))
        .and(query_param("radius", "5000"))
        .and(query_param("keyword", "crêperie bretonne"))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(vec![
            provider_place(0, Some(4.6)),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/search?activity=cr%C3%AAperie%20bretonne&radius=5000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["places"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_passes_provider_results_through_untouched() {
    let server = MockServer::start().await;
    let mut quirky = provider_place(3, None);
    quirky["plus_code"] = json!({ "compound_code": "JVQG+8M Montpellier" });
    quirky["photos"] = json!([{
        "height": 3024,
        "width": 4032,
        "html_attributions": ["<a href=\"https://maps.google.com\">A</a>"],
        "photo_reference": "AUc7tXV"
    }]);
    let places = vec![provider_place(0, Some(4.2)), quirky];

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(places.clone())))
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/search?activity=museum&radius=10000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "places": places }));
}

#[tokio::test]
async fn zero_results_is_an_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html_attributions": [],
            "results": [],
            "status": "ZERO_RESULTS"
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/search?activity=patinoire&radius=30000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "places": [] }));
}

#[tokio::test]
async fn missing_or_blank_parameters_never_reach_the_provider() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    for uri in [
        "/api/search",
        "/api/search?activity=&radius=5000",
        "/api/search?activity=%20%20&radius=5000",
        "/api/search?activity=restaurant",
        "/api/search?activity=restaurant&radius=",
        "/api/search?activity=restaurant&radius=far",
        "/api/search?activity=restaurant&radius=-5",
        "/api/search?activity=restaurant&radius=0",
        "/api/search?activity=restaurant&radius=60000",
    ] {
        let (status, body) = get(application(&config(&server)), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "invalid_input", "{}", uri);
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

#[tokio::test]
async fn provider_http_failure_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/search?activity=restaurant&radius=5000",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
}

#[tokio::test]
async fn provider_denial_with_http_ok_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error_message": "The provided API key is invalid.",
            "html_attributions": [],
            "results": [],
            "status": "REQUEST_DENIED"
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/search?activity=restaurant&radius=5000",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
    assert!(!body["message"].as_str().unwrap().contains("API key"));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(nearby_body(vec![]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/search?activity=restaurant&radius=5000",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
}

#[tokio::test]
async fn non_list_results_are_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": { "place_id": "place-0" },
            "status": "OK"
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/search?activity=restaurant&radius=5000",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
}

#[tokio::test]
async fn padded_activity_is_forwarded_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("keyword", "restaurant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nearby_body(vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = get(
        application(&config(&server)),
        "/api/search?activity=%20restaurant%20&radius=5000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

// ── Details ─────────────────────────────────────────────────────────

#[tokio::test]
async fn details_request_the_detail_fields_and_return_the_result() {
    let server = MockServer::start().await;
    let result = json!({
        "name": "Restaurant 0",
        "formatted_address": "12 Rue de l'Aiguillerie, 34000 Montpellier, France",
        "formatted_phone_number": "04 67 60 00 00",
        "website": "https://restaurant-zero.fr",
        "opening_hours": { "open_now": true, "weekday_text": ["Monday: 12:00 – 2:30 PM"] },
        "rating": 4.6,
        "user_ratings_total": 812
    });
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .and(query_param("place_id", "place-0"))
        .and(query_param("fields", DETAIL_FIELDS.join(",").as_str()))
        .and(query_param("key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html_attributions": [],
            "result": result.clone(),
            "status": "OK"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/details?place_id=place-0",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, result);
    assert!(provider_place(0, Some(4.6)).get("formatted_phone_number").is_none());
}

#[tokio::test]
async fn details_without_place_id_is_invalid_input() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for uri in ["/api/details", "/api/details?place_id="] {
        let (status, body) = get(application(&config(&server)), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "invalid_input", "{}", uri);
    }
}

#[tokio::test]
async fn unknown_place_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html_attributions": [],
            "status": "NOT_FOUND"
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/details?place_id=gone",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
}

#[tokio::test]
async fn ok_status_without_result_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAILS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "html_attributions": [],
            "status": "OK"
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        application(&config(&server)),
        "/api/details?place_id=place-0",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "upstream_error");
}

// ── Key, health, fallback ───────────────────────────────────────────

#[tokio::test]
async fn key_prefers_the_browser_key() {
    let server = MockServer::start().await;
    let config = nearby_relay::config::Config {
        browser_api_key: Some("browser-key".to_string()),
        ..config(&server)
    };

    let (status, body) = get(application(&config), "/api/key").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "apiKey": "browser-key" }));
}

#[tokio::test]
async fn key_falls_back_to_the_server_credential() {
    let server = MockServer::start().await;

    let (status, body) = get(application(&config(&server)), "/api/key").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apiKey"], TEST_KEY);
}

#[tokio::test]
async fn key_without_any_credential_is_a_configuration_error() {
    let server = MockServer::start().await;
    let config = nearby_relay::config::Config {
        api_key: None,
        ..config(&server)
    };

    let (status, body) = get(application(&config), "/api/key").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "configuration_error");
}

#[tokio::test]
async fn health_check_does_not_touch_the_provider() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = get(application(&config(&server)), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_routes_get_a_json_not_found() {
    let server = MockServer::start().await;

    let (status, body) = get(application(&config(&server)), "/api/bookmarks").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn allowed_origin_is_echoed_back() {
    let server = MockServer::start().await;
    let response = application(&config(&server))
        .oneshot(
            Request::builder()
                .uri("/api/key")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn foreign_origin_is_not_allowed() {
    let server = MockServer::start().await;
    let response = application(&config(&server))
        .oneshot(
            Request::builder()
                .uri("/api/key")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

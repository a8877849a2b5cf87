use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use crate::error::ErrorBody;

pub async fn page_not_found_handler(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(format!("No endpoint at {}", uri.path()), "not_found")),
    )
}

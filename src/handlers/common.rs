//! Banner and router fallbacks.

use crate::error::AppError;
use crate::extractors::EntityId;
use axum::{http::Uri, response::Html};

pub const BANNER: &str = "<h1>Bakery GET-POST-PATCH-DELETE API</h1>";

pub async fn home() -> Html<&'static str> {
    Html(BANNER)
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Method fallback for `/:id` routes: an id that is not an integer names nothing, so 404.
pub async fn method_not_allowed_for_id(_id: EntityId) -> AppError {
    AppError::MethodNotAllowed
}

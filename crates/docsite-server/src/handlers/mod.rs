//! HTTP request handlers.

pub(crate) mod page;

use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;

/// Fallback for every path other than `/`.
pub(crate) async fn not_found(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route");
    (StatusCode::NOT_FOUND, "Not Found")
}

//! Documentation page endpoint.
//!
//! Runs the page pipeline for every request and returns the full HTML
//! document. A failed render still returns HTML (the fallback view) with a
//! 500 status.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};

use crate::state::AppState;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Handle GET /.
pub(crate) async fn get_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let page = state.composer.compose();

    let status = if page.is_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    if state.verbose {
        tracing::info!(
            status = status.as_u16(),
            bytes = page.html.len(),
            "Served documentation page"
        );
    }

    if page.is_error() {
        return (
            status,
            [
                (header::CONTENT_TYPE, HTML_CONTENT_TYPE.to_owned()),
                (header::CACHE_CONTROL, "no-store".to_owned()),
            ],
            page.html,
        )
            .into_response();
    }

    let etag = compute_etag(&state.version, &page.html);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
    }

    (
        status,
        [
            (header::CONTENT_TYPE, HTML_CONTENT_TYPE.to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        page.html,
    )
        .into_response()
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache validation with negligible collision probability.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

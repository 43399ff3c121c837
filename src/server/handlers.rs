//! HTTP request handlers for the web server.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::AppState;
use crate::models::Mmif;
use crate::services::annotation::parse_bool;
use crate::services::{ProcessingFailure, RuntimeParams};

const JSON_MIME_TYPE: &str = "application/json";

fn json_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, JSON_MIME_TYPE)], body).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, json!({ "error": message }).to_string())
}

/// `application/json`, optionally with parameters such as a charset.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(JSON_MIME_TYPE))
}

/// App metadata.
pub async fn metadata(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let pretty = query
        .iter()
        .rev()
        .find(|(k, _)| k == "pretty")
        .and_then(|(_, v)| parse_bool(v))
        .unwrap_or(state.annotator.default_pretty());
    json_response(StatusCode::OK, state.metadata.to_json(pretty))
}

/// Annotate the MMIF in the request body.
pub async fn annotate(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    if !is_json(&headers) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid Content Type");
    }

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Rejecting request body: {}", e);
            return error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                &format!("Request body exceeds {} bytes", state.max_body_bytes),
            );
        }
    };

    let Ok(text) = std::str::from_utf8(&body) else {
        return error_response(StatusCode::BAD_REQUEST, "Request body is not UTF-8");
    };
    let input = match Mmif::parse(text) {
        Ok(mmif) => mmif,
        Err(e) => {
            tracing::debug!("Rejecting request: {}", e);
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            return error_response(status, &e.to_string());
        }
    };

    let params = RuntimeParams::from_pairs(query);
    let pretty = params.pretty.unwrap_or(state.annotator.default_pretty());

    let (status, mmif) = match state.annotator.process(input, &params).await {
        Ok(mmif) => (StatusCode::OK, mmif),
        Err(ProcessingFailure { mmif, error }) => {
            tracing::error!("Failed to annotate request: {}", error);
            (StatusCode::INTERNAL_SERVER_ERROR, mmif)
        }
    };

    match mmif.to_json(pretty) {
        Ok(body) => json_response(status, body),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

/// Liveness check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

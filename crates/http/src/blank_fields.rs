//! Blank-field filter for create and update payloads.
//!
//! `{"author": {"name": "", "bio": "x"}}` becomes `{"author": {"bio": "x"}}`,
//! so an empty form field is never stored and never overwrites a stored value.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::AppError;

/// Upper bound on a buffered request body.
#[derive(Debug, Clone, Copy)]
pub struct BodyLimit(pub usize);

/// Remove `""` entries from every object nested one level under the root.
///
/// Returns how many fields were removed.
pub fn strip_blank_fields(payload: &mut Value) -> usize {
    let Value::Object(root) = payload else {
        return 0;
    };

    let mut removed = 0;
    for nested in root.values_mut() {
        if let Value::Object(fields) = nested {
            let before = fields.len();
            fields.retain(|_, value| !matches!(value, Value::String(s) if s.is_empty()));
            removed += before - fields.len();
        }
    }
    removed
}

fn rewrite(bytes: Bytes) -> Bytes {
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(mut payload) => {
            if strip_blank_fields(&mut payload) == 0 {
                return bytes;
            }
            match serde_json::to_vec(&payload) {
                Ok(rewritten) => Bytes::from(rewritten),
                Err(_) => bytes,
            }
        }
        // Leave malformed bodies for the handler to reject.
        Err(_) => bytes,
    }
}

/// Axum middleware applying [`strip_blank_fields`] to the request body.
pub async fn remove_blank_fields(
    State(limit): State<BodyLimit>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, limit.0).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return AppError::bad_request(format!("failed to read request body: {err}"))
                .into_response()
        }
    };

    let bytes = rewrite(bytes);
    if let Ok(length) = HeaderValue::from_str(&bytes.len().to_string()) {
        parts.headers.insert(header::CONTENT_LENGTH, length);
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

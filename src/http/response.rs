//! Rendering of handler resolutions as HTTP responses.
//!
//! # Responsibilities
//! - `Redirect` → 302 Found with `Location`
//! - `Greeting` → 200 OK, `text/plain; charset=utf-8`
//!
//! # Design Decisions
//! - Redirect targets are emitted verbatim except for bytes that cannot
//!   appear in a header value, which are percent-escaped
//! - Relative targets are not resolved against the request path
//! - Redirects carry no body

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::handler::Resolution;

impl IntoResponse for Resolution<'_> {
    fn into_response(self) -> Response {
        match self {
            Resolution::Redirect(target) => redirect(target),
            Resolution::Greeting(body) => (StatusCode::OK, body.to_owned()).into_response(),
        }
    }
}

/// Build a 302 response pointing at `target`.
pub fn redirect(target: &str) -> Response {
    match HeaderValue::from_str(&escape_location(target)) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            // Unreachable after escaping, kept so a bad target can never panic a request
            tracing::error!(target = %target, error = %e, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Percent-escape bytes that are not allowed in a header value.
///
/// Non-ASCII bytes and ASCII control characters become `%XX`; everything
/// else, including existing escapes, passes through unchanged.
pub fn escape_location(target: &str) -> String {
    let mut escaped = String::with_capacity(target.len());
    for &byte in target.as_bytes() {
        if byte >= 0x80 || byte < 0x20 || byte == 0x7f {
            escaped.push_str(&format!("%{:02X}", byte));
        } else {
            escaped.push(byte as char);
        }
    }
    escaped
}

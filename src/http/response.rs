//! HTTP response building module
//!
//! Turns serializable payloads into hyper responses, decoupled from routing.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, SERVER};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Build a JSON response
///
/// For HEAD requests the headers, including `Content-Length`, describe the
/// body a GET would have produced, but the body itself is empty.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            log_build_error("JSON", &e);
            return fallback_500();
        }
    };

    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length)
        .header(SERVER, server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            fallback_500()
        })
}

/// Last-resort response when serialization or header validation fails
fn fallback_500() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(
        br#"{"error":"Internal Server Error"}"#,
    )));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn log_build_error(what: &str, error: &dyn std::fmt::Display) {
    crate::logger::log_error(&format!("Failed to build {what} response: {error}"));
}

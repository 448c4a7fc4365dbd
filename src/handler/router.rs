//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: converts the hyper request into an
//! `ApiRequest`, dispatches it, renders the JSON response and writes the
//! access log line.

use crate::api::{self, ApiRequest};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::USER_AGENT;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let is_head = parts.method == Method::HEAD;

    let mut entry = state.config.logging.access_log.then(|| {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            parts.method.to_string(),
            parts.uri.path().to_string(),
        );
        entry.query = parts.uri.query().map(ToString::to_string);
        entry.http_version = version_label(parts.version).to_string();
        entry.user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry
    });

    let request = ApiRequest::new(parts.method.clone(), parts.uri.path())
        .with_query(parts.uri.query().unwrap_or_default());

    // Only JSON bodies are read; anything else is left unconsumed
    let api_response = if http::is_json_content_type(&parts.headers) {
        let limit = usize::try_from(state.config.http.max_body_size).unwrap_or(usize::MAX);
        match http::collect_body(body, limit).await {
            Ok(bytes) => api::dispatch(&request.with_json_body(bytes), &state),
            Err(e) => {
                logger::log_error(&format!("{} {}: {e}", parts.method, parts.uri.path()));
                api::failure(&e.into())
            }
        }
    } else {
        api::dispatch(&request, &state)
    };

    let response = http::json_response(
        api_response.status,
        &api_response.payload,
        &state.config.http.server_name,
        is_head,
    );

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::header::CONTENT_TYPE;
    use hyper::StatusCode;
    use serde_json::Value;

    fn state(extra: &str) -> Arc<AppState> {
        let toml = format!("[logging]\naccess_log = false\nlevel = \"error\"\n{extra}");
        Arc::new(AppState::new(Config::from_toml_str(&toml).unwrap()))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    async fn send(req: Request<Full<Bytes>>, state: Arc<AppState>) -> (StatusCode, Value) {
        let response = handle_request(req, state, peer()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_echo_without_content_type_ignores_body() {
        let req = Request::post("/api/echo")
            .body(Full::new(Bytes::from_static(br#"{"message":"hi"}"#)))
            .unwrap();

        let (status, body) = send(req, state("")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["echo"], "No message provided");
    }

    #[tokio::test]
    async fn test_echo_with_json_content_type() {
        let req = Request::post("/api/echo")
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from_static(br#"{"message":"hi"}"#)))
            .unwrap();

        let (status, body) = send(req, state("")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["echo"], "hi");
    }

    #[tokio::test]
    async fn test_oversized_body_fails_before_routing() {
        let req = Request::post("/no/such/route")
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(vec![b' '; 64])))
            .unwrap();

        let (status, body) = send(req, state("[http]\nmax_body_size = 8")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "request entity too large (limit: 8 bytes)");
    }

    #[tokio::test]
    async fn test_query_reaches_handler() {
        let req = Request::get("/api/calculate?a=2&b=3")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let (status, body) = send(req, state("")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 5);
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_09), "0.9");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
        assert_eq!(version_label(Version::HTTP_3), "3");
    }
}

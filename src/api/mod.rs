// API module entry
// Request Router & Responder: route lookup, handler invocation, and the
// uniform 404 / 500 payloads

mod coerce;
mod error;
mod handlers;
mod types;

use hyper::StatusCode;

use crate::config::AppState;
use crate::logger;
use crate::routing;

// Re-export public types
pub use error::HandlerError;
pub use types::*;

const NOT_FOUND_MESSAGE: &str = "Endpoint not found. Use GET / to see available endpoints.";

/// Produce exactly one response for a request
///
/// Handler failures are turned into a 500 payload here and never escape.
pub fn dispatch(req: &ApiRequest, state: &AppState) -> ApiResponse {
    let Some(kind) = routing::match_route(&req.method, &req.path) else {
        logger::log_debug(&format!("No route for {} {}", req.method, req.path));
        return not_found(&req.path);
    };

    match handlers::handle(kind, req, state) {
        Ok(payload) => ApiResponse::ok(payload),
        Err(e) => {
            logger::log_error(&format!("{} {} failed: {e}", req.method, req.path));
            failure(&e)
        }
    }
}

/// 404 Not Found response
pub fn not_found(path: &str) -> ApiResponse {
    ApiResponse {
        status: StatusCode::NOT_FOUND,
        payload: Payload::NotFound(NotFoundPayload {
            error: "Not Found",
            path: path.to_string(),
            message: NOT_FOUND_MESSAGE,
        }),
    }
}

/// 500 Internal Server Error response; the failure text is passed through
pub fn failure(err: &HandlerError) -> ApiResponse {
    ApiResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        payload: Payload::Failure(FailurePayload {
            error: "Internal Server Error",
            message: err.to_string(),
        }),
    }
}

// Request, response and payload types for the JSON API

use std::collections::BTreeMap;

use hyper::body::Bytes;
use hyper::{Method, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value};

use super::coerce::serialize_number;
use super::error::HandlerError;
use crate::http::{parse_query, QueryParams};

/// One incoming call, stripped of transport details
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    /// Raw body; only read when `json_body` is set
    pub body: Bytes,
    pub json_body: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: Bytes::new(),
            json_body: false,
        }
    }

    #[must_use]
    pub fn with_query(mut self, raw: &str) -> Self {
        self.query = parse_query(Some(raw));
        self
    }

    #[must_use]
    pub fn with_json_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self.json_body = true;
        self
    }

    /// Non-empty query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Top-level JSON object of the body
    ///
    /// `None` when the request is not JSON, the body is blank, or it is an
    /// array (which has no named fields).
    pub fn json_object(&self) -> Result<Option<Map<String, Value>>, HandlerError> {
        if !self.json_body || self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match serde_json::from_slice::<Value>(&self.body)? {
            Value::Object(map) => Ok(Some(map)),
            Value::Array(_) => Ok(None),
            Value::Null => Err(HandlerError::UnsupportedBody("null")),
            Value::Bool(_) => Err(HandlerError::UnsupportedBody("a boolean")),
            Value::Number(_) => Err(HandlerError::UnsupportedBody("a number")),
            Value::String(_) => Err(HandlerError::UnsupportedBody("a string")),
        }
    }
}

/// Status plus payload; serialized exactly once
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub payload: Payload,
}

impl ApiResponse {
    pub const fn ok(payload: Payload) -> Self {
        Self {
            status: StatusCode::OK,
            payload,
        }
    }
}

/// Every body the service can send, one variant per route plus the two
/// error shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Index(IndexPayload),
    Hello(HelloPayload),
    Calculation(CalculationPayload),
    Status(StatusPayload),
    Version(VersionPayload),
    Info(InfoPayload),
    Health(HealthPayload),
    Echo(EchoPayload),
    NotFound(NotFoundPayload),
    Failure(FailurePayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexPayload {
    pub message: String,
    pub version: String,
    pub environment: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelloPayload {
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationPayload {
    pub operation: &'static str,
    #[serde(serialize_with = "serialize_number")]
    pub a: f64,
    #[serde(serialize_with = "serialize_number")]
    pub b: f64,
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPayload {
    pub status: &'static str,
    /// Seconds since process start
    pub uptime: f64,
    pub environment: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionPayload {
    pub version: String,
    pub name: String,
    pub environment: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoPayload {
    pub app: String,
    pub description: String,
    pub features: Vec<String>,
    pub deployment_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EchoPayload {
    pub echo: Value,
    pub received_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundPayload {
    pub error: &'static str,
    pub path: String,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailurePayload {
    pub error: &'static str,
    pub message: String,
}

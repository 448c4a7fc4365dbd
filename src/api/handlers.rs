// Route handlers
// Each one is a pure function of the request, the immutable state and the
// current clock

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use super::coerce::parse_numeric_or_zero;
use super::error::HandlerError;
use super::types::{
    ApiRequest, CalculationPayload, EchoPayload, HealthPayload, HelloPayload, IndexPayload,
    InfoPayload, Payload, StatusPayload, VersionPayload,
};
use crate::config::AppState;
use crate::routing::{RouteKind, ROUTES};

const DEFAULT_NAME: &str = "World";
const DEFAULT_ECHO: &str = "No message provided";

/// Run the handler a route resolved to
pub fn handle(kind: RouteKind, req: &ApiRequest, state: &AppState) -> Result<Payload, HandlerError> {
    match kind {
        RouteKind::Index => Ok(index(state)),
        RouteKind::Hello => Ok(hello(req)),
        RouteKind::Calculate => Ok(calculate(req)),
        RouteKind::Status => Ok(status(state)),
        RouteKind::Version => Ok(version(state)),
        RouteKind::Info => Ok(info(state)),
        RouteKind::Health => Ok(health()),
        RouteKind::Echo => echo(req),
    }
}

/// Current wall-clock time, e.g. `2025-01-01T12:00:00.000Z`
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn index(state: &AppState) -> Payload {
    let service = state.service();
    Payload::Index(IndexPayload {
        message: service.message.clone(),
        version: service.version.clone(),
        environment: state.environment().to_string(),
        endpoints: ROUTES.iter().map(|r| (r.path, r.summary)).collect(),
    })
}

fn hello(req: &ApiRequest) -> Payload {
    let name = req.query_param("name").unwrap_or(DEFAULT_NAME);
    Payload::Hello(HelloPayload {
        message: format!("Hello, {name}!"),
        timestamp: timestamp(),
    })
}

fn calculate(req: &ApiRequest) -> Payload {
    let a = parse_numeric_or_zero(req.query.get("a").map(String::as_str));
    let b = parse_numeric_or_zero(req.query.get("b").map(String::as_str));
    Payload::Calculation(CalculationPayload {
        operation: "addition",
        a,
        b,
        result: a + b,
        timestamp: timestamp(),
    })
}

fn status(state: &AppState) -> Payload {
    Payload::Status(StatusPayload {
        status: "running",
        uptime: state.uptime_secs(),
        environment: state.environment().to_string(),
        timestamp: timestamp(),
    })
}

fn version(state: &AppState) -> Payload {
    let service = state.service();
    Payload::Version(VersionPayload {
        version: service.version.clone(),
        name: service.name.clone(),
        environment: state.environment().to_string(),
        platform: service.platform.clone(),
    })
}

fn info(state: &AppState) -> Payload {
    let service = state.service();
    Payload::Info(InfoPayload {
        app: service.name.clone(),
        description: service.description.clone(),
        features: service.features.clone(),
        deployment_method: service.deployment_method.clone(),
    })
}

const fn health() -> Payload {
    Payload::Health(HealthPayload { status: "ok" })
}

fn echo(req: &ApiRequest) -> Result<Payload, HandlerError> {
    let message = req
        .json_object()?
        .and_then(|mut body| body.remove("message"))
        .filter(is_truthy)
        .unwrap_or_else(|| Value::String(DEFAULT_ECHO.to_string()));

    Ok(Payload::Echo(EchoPayload {
        echo: message,
        received_at: timestamp(),
    }))
}

/// `null`, `false`, `0` and `""` count as "no message"
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), "2025-01-01T12:00:00.000Z".len());
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("hi")));
        assert!(is_truthy(&json!(7)));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}

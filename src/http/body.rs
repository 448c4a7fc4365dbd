//! Request body collection

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, CONTENT_TYPE};
use std::fmt;

/// Failure while reading a request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyError {
    TooLarge { limit: usize },
    Read(String),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { limit } => {
                write!(f, "request entity too large (limit: {limit} bytes)")
            }
            Self::Read(msg) => write!(f, "failed to read request body: {msg}"),
        }
    }
}

impl std::error::Error for BodyError {}

/// Collect a whole body, failing once more than `limit` bytes arrive
pub async fn collect_body<B>(body: B, limit: usize) -> Result<Bytes, BodyError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(BodyError::TooLarge { limit })
        }
        Err(e) => Err(BodyError::Read(e.to_string())),
    }
}

/// Whether the request declares a JSON body (`application/json` or `*+json`)
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::header::HeaderValue;

    #[tokio::test]
    async fn test_collect_within_limit() {
        let body = Full::new(Bytes::from_static(b"{\"message\":\"hi\"}"));
        let bytes = collect_body(body, 1024).await.unwrap();
        assert_eq!(&bytes[..], b"{\"message\":\"hi\"}");
    }

    #[tokio::test]
    async fn test_collect_over_limit() {
        let body = Full::new(Bytes::from(vec![b'x'; 64]));
        let err = collect_body(body, 16).await.unwrap_err();
        assert_eq!(err, BodyError::TooLarge { limit: 16 });
        assert!(err.to_string().starts_with("request entity too large"));
    }

    #[test]
    fn test_json_content_type() {
        let mut headers = HeaderMap::new();
        assert!(!is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(is_json_content_type(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Application/JSON; charset=utf-8"),
        );
        assert!(is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        assert!(is_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json_content_type(&headers));
    }
}

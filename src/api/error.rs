// Handler failure type
// Everything that can go wrong while building a response; all of it ends up
// as a 500 payload carrying the Display text

use std::fmt;

use crate::http::BodyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The body claimed to be JSON but did not parse
    MalformedBody(String),
    /// Valid JSON, but a scalar where an object was expected
    UnsupportedBody(&'static str),
    /// The body could not be collected from the connection
    Body(BodyError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBody(msg) => write!(f, "Malformed JSON body: {msg}"),
            Self::UnsupportedBody(kind) => {
                write!(f, "JSON body must be an object or array, got {kind}")
            }
            Self::Body(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Body(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BodyError> for HandlerError {
    fn from(e: BodyError) -> Self {
        Self::Body(e)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedBody(e.to_string())
    }
}

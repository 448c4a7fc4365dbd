//! HTTP protocol layer module
//!
//! Query decoding, body collection and JSON response building, kept apart
//! from the route handlers so those never touch hyper types.

pub mod body;
pub mod query;
pub mod response;

// Re-export commonly used items
pub use body::{collect_body, is_json_content_type, BodyError};
pub use query::{parse_query, QueryParams};
pub use response::json_response;

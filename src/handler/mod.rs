//! Request handler module
//!
//! Bridges hyper requests onto the JSON API.

mod router;

pub use router::handle_request;

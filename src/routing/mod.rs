//! Routing module
//!
//! Exact-path route table consulted by the API dispatcher.

mod table;

pub use table::{match_route, RouteKind, ROUTES};

//! Static route table
//!
//! Every route is a (method, path) pair. Paths compare ignoring ASCII case
//! and a single trailing slash. The table is a `const` slice, so it is fixed
//! before the first request arrives.

use hyper::Method;

/// Which handler a matched route dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Index,
    Hello,
    Calculate,
    Status,
    Version,
    Info,
    Health,
    Echo,
}

/// A registered (method, path) → handler mapping
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub method: RouteMethod,
    pub path: &'static str,
    pub kind: RouteKind,
    /// Human readable summary listed by `GET /`
    pub summary: &'static str,
}

/// Methods a route can be registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
}

impl RouteMethod {
    /// HEAD is served by the GET route of the same path
    fn accepts(self, method: &Method) -> bool {
        match self {
            Self::Get => method == Method::GET || method == Method::HEAD,
            Self::Post => method == Method::POST,
        }
    }
}

pub const ROUTES: &[Route] = &[
    Route {
        method: RouteMethod::Get,
        path: "/",
        kind: RouteKind::Index,
        summary: "This endpoint",
    },
    Route {
        method: RouteMethod::Get,
        path: "/api/hello",
        kind: RouteKind::Hello,
        summary: "Hello message with name parameter",
    },
    Route {
        method: RouteMethod::Get,
        path: "/api/calculate",
        kind: RouteKind::Calculate,
        summary: "Simple calculator with a + b parameters",
    },
    Route {
        method: RouteMethod::Get,
        path: "/api/status",
        kind: RouteKind::Status,
        summary: "Get application status",
    },
    Route {
        method: RouteMethod::Get,
        path: "/api/version",
        kind: RouteKind::Version,
        summary: "Application version",
    },
    Route {
        method: RouteMethod::Get,
        path: "/api/info",
        kind: RouteKind::Info,
        summary: "Application information",
    },
    Route {
        method: RouteMethod::Get,
        path: "/health",
        kind: RouteKind::Health,
        summary: "Health check",
    },
    Route {
        method: RouteMethod::Post,
        path: "/api/echo",
        kind: RouteKind::Echo,
        summary: "Echo back the JSON body's message field",
    },
];

/// Find the route registered for this method and path
pub fn match_route(method: &Method, path: &str) -> Option<RouteKind> {
    let path = trim_trailing_slash(path);
    ROUTES
        .iter()
        .find(|route| route.path.eq_ignore_ascii_case(path) && route.method.accepts(method))
        .map(|route| route.kind)
}

/// `/health/` matches `/health`; the root path keeps its slash
fn trim_trailing_slash(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

use http::header::InvalidHeaderValue;
use std::str::Utf8Error;
use thiserror::Error;

/// The error type for the routing operations which surface a hard failure to the caller.
///
/// Request-handling outcomes (method not allowed, not found, handler failure) are never reported through
/// this type, they are recovered into the registered error handler replies instead.
#[derive(Debug, Error)]
pub enum Error {
    /// No registered route carries the requested name.
    #[error("no route with that name: {0}")]
    NoSuchNamedRoute(String),

    /// The redirect location can't be used as a `Location` header value.
    #[error("invalid redirect location {location:?}: {source}")]
    InvalidRedirect {
        location: String,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error("couldn't percent decode request path: {0}")]
    PathDecode(#[from] Utf8Error),
}

/// The boxed error a failing route handler is converted into before it's logged and replaced by the
/// `500` reply.
pub type RouteError = Box<dyn std::error::Error + Send + Sync>;

//! `Routerlet` is a minimal HTTP request router: it matches a method and a path against an ordered list of route
//! patterns, calls the handler of the first match and falls back to status-class error handlers when nothing
//! matches or the handler fails. Named routes can be turned back into paths.
//!
//! Routerlet's features:
//!
//! - First-match-wins dispatch in registration order
//!
//! - Required `{name}` and optional `{name?}` path parameters
//!
//! - `400`, `404` and `500` error handlers with built-in defaults
//!
//! - Reverse routing by route name
//!
//! - A [hyper](https://hyper.rs/) [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) adapter
//!
//! ## Basic Example
//!
//! ```
//! use hyper::{Method, StatusCode};
//! use routerlet::Router;
//! use std::io;
//!
//! fn router() -> Router<String, io::Error> {
//!     let mut router: Router<String, io::Error> = Router::new();
//!
//!     router.get("/", || Ok("Home page".to_owned()));
//!     router
//!         .add_with_params(Method::GET, "/users/{id}", |params| {
//!             Ok(format!("Hello {}", params.get("id").unwrap_or_default()))
//!         })
//!         .set_name("user");
//!     router.get("/broken", || Err(io::Error::other("disk full")));
//!
//!     router.error_handler(StatusCode::INTERNAL_SERVER_ERROR, || "Something went wrong".to_owned());
//!     router
//! }
//!
//! let mut router = router();
//!
//! assert_eq!(router.dispatch(&Method::GET, "/users/42"), "Hello 42");
//! assert_eq!(router.current().unwrap().parameters().get("id"), Some("42"));
//! assert_eq!(router.dispatch(&Method::GET, "/broken"), "Something went wrong");
//! assert_eq!(router.dispatch(&Method::DELETE, "/"), "not allowed");
//! assert_eq!(router.dispatch(&Method::GET, "/nowhere"), "not found");
//! assert_eq!(router.route("user", [("id", 7)]).unwrap(), "/users/7");
//! ```
//!
//! ## Route Paths
//!
//! A route path is made of `/`-separated segments:
//!
//! - `{name}` captures one or more characters other than `/`.
//! - `{name?}` captures zero or more characters other than `/`, so the segment may be left out.
//! - Any other segment must match literally.
//!
//! A request whose method and path are byte-identical to a route's registered values always matches it. Otherwise
//! both paths are normalised (outer slashes trimmed, repeated slashes collapsed) and the request path is matched
//! against the pattern, anchored at both ends. A route path without any parameter is only ever matched
//! byte-for-byte: `/about` doesn't match `/about/`.
//!
//! ```txt
//! Route path: /users/{id}/posts/{page?}
//! Request path: /users/alice/posts
//! parameters: { "id": Some("alice"), "page": None }
//! ```
//!
//! ## Error Handling
//!
//! - When no route matches but the request path equals the raw path of a registered route, the `400` handler replies.
//! - When no route matches at all, the `404` handler replies.
//! - When the matched handler returns an error or panics, the failure is logged and the `500` handler replies.
//!
//! Only [`Router::route`] reports an [`Error`] to the caller, when no route carries the requested name.

pub use self::error::{Error, RouteError};
pub use self::reply::{redirect, Reply};
pub use self::route::Route;
pub use self::router::Router;
pub use self::service::RouterService;
pub use self::types::{RouteMatch, RouteParams};

mod constants;
mod error;
mod helpers;
mod regex_generator;
mod reply;
mod route;
mod router;
mod service;
mod types;

/// A Result type often returned from methods that can have routerlet errors.
pub type Result<T> = std::result::Result<T, Error>;

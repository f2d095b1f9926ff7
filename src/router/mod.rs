use crate::constants::{DEFAULT_METHOD, DEFAULT_PATH, NOT_ALLOWED_TEXT, NOT_FOUND_TEXT, SERVER_ERROR_TEXT};
use crate::error::{Error, RouteError};
use crate::regex_generator::strip_placeholders;
use crate::reply::{self, Reply};
use crate::route::{Handler, Route};
use crate::types::RouteParams;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::any::Any;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::panic::{self, AssertUnwindSafe};

type ErrorHandler<T> = Box<dyn Fn() -> T + Send + Sync + 'static>;

/// Represents a modular, lightweight router.
///
/// Routes are tried in registration order and the first one whose method and path match wins, there is no
/// most-specific-match resolution. When nothing matches, the router answers with one of its error handlers:
///
/// * `400` when the request path is byte-identical to the raw path of some registered route, i.e. the path exists
///   but not for this method.
/// * `404` otherwise.
/// * `500` when the matched route's handler fails or panics.
///
/// Each error handler falls back to a built-in stub reply ("not allowed", "not found", "server error") until one is
/// registered with [`error_handler`](Self::error_handler).
///
/// This `Router<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the reply type of every handler, it must implement [`Reply`](./trait.Reply.html).
/// * The `E` represents the error type the route handlers may fail with.
///
/// A router keeps per-dispatch state (the current route, the captured parameters), so a dispatch needs exclusive
/// access to it.
///
/// # Examples
///
/// ```
/// use hyper::{Method, StatusCode};
/// use routerlet::Router;
/// use std::io;
///
/// let mut router: Router<String, io::Error> = Router::new();
///
/// router.get("/", || Ok("Home page".to_owned()));
/// router.add_with_params(Method::GET, "/users/{id}", |params| {
///     Ok(format!("Hello {}", params.get("id").unwrap_or("stranger")))
/// });
/// router.error_handler(StatusCode::NOT_FOUND, || "Page Not Found".to_owned());
///
/// assert_eq!(router.dispatch(&Method::GET, "/users/42"), "Hello 42");
/// assert_eq!(router.current().unwrap().path(), "/users/{id}");
/// assert_eq!(router.dispatch(&Method::POST, "/"), "not allowed");
/// assert_eq!(router.dispatch(&Method::GET, "/missing"), "Page Not Found");
/// ```
pub struct Router<T, E> {
    routes: Vec<Route<T, E>>,
    error_handlers: HashMap<StatusCode, ErrorHandler<T>>,
    current: Option<usize>,
}

impl<T: Reply + 'static, E: Into<RouteError> + 'static> Router<T, E> {
    /// Creates a router without any routes or error handlers.
    pub fn new() -> Router<T, E> {
        Router {
            routes: Vec::new(),
            error_handlers: HashMap::new(),
            current: None,
        }
    }

    /// Registers a route with a handler taking no arguments and returns it, so it can be named.
    pub fn add<P, H>(&mut self, method: Method, path: P, handler: H) -> &mut Route<T, E>
    where
        P: Into<String>,
        H: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.push_route(method, path, Box::new(move |_: &RouteParams| handler()))
    }

    /// Registers a route whose handler receives the parameters captured from the request path.
    pub fn add_with_params<P, H>(&mut self, method: Method, path: P, handler: H) -> &mut Route<T, E>
    where
        P: Into<String>,
        H: Fn(&RouteParams) -> Result<T, E> + Send + Sync + 'static,
    {
        self.push_route(method, path, Box::new(handler))
    }

    /// Adds a new route with `GET` method and the handler at the specified path.
    pub fn get<P, H>(&mut self, path: P, handler: H) -> &mut Route<T, E>
    where
        P: Into<String>,
        H: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.add(Method::GET, path, handler)
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H>(&mut self, path: P, handler: H) -> &mut Route<T, E>
    where
        P: Into<String>,
        H: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.add(Method::POST, path, handler)
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H>(&mut self, path: P, handler: H) -> &mut Route<T, E>
    where
        P: Into<String>,
        H: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.add(Method::PUT, path, handler)
    }

    /// Adds a new route with `PATCH` method and the handler at the specified path.
    pub fn patch<P, H>(&mut self, path: P, handler: H) -> &mut Route<T, E>
    where
        P: Into<String>,
        H: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.add(Method::PATCH, path, handler)
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H>(&mut self, path: P, handler: H) -> &mut Route<T, E>
    where
        P: Into<String>,
        H: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.add(Method::DELETE, path, handler)
    }

    fn push_route<P: Into<String>>(&mut self, method: Method, path: P, handler: Handler<T, E>) -> &mut Route<T, E> {
        let idx = self.routes.len();
        self.routes.push(Route::new(method, path, handler));
        &mut self.routes[idx]
    }

    /// Registers or replaces the error handler for a status code.
    ///
    /// Any code is accepted, but only `400`, `404` and `500` are ever consulted by [`dispatch`](Self::dispatch).
    pub fn error_handler<H>(&mut self, code: StatusCode, handler: H) -> &mut Router<T, E>
    where
        H: Fn() -> T + Send + Sync + 'static,
    {
        self.error_handlers.insert(code, Box::new(handler));
        self
    }

    /// Dispatches a request to the first route matching `method` and `path` and returns the handler's reply.
    ///
    /// A handler failure, whether an `Err` or a panic, is logged and replaced by the `500` reply. Failures inside the
    /// error handlers themselves are not caught.
    pub fn dispatch(&mut self, method: &Method, path: &str) -> T {
        let matched = self.routes.iter_mut().position(|route| route.matches(method, path));

        let idx = match matched {
            Some(idx) => idx,
            None if self.paths().any(|route_path| route_path == path) => {
                tracing::debug!(%method, path, "path is registered for another method");
                return self.dispatch_not_allowed();
            }
            None => {
                tracing::debug!(%method, path, "no route found");
                return self.dispatch_not_found();
            }
        };

        self.current = Some(idx);
        let route = &self.routes[idx];
        tracing::debug!(%method, path, route = route.path(), "dispatching request");

        let failure: RouteError = match panic::catch_unwind(AssertUnwindSafe(|| route.dispatch())) {
            Ok(Ok(reply)) => return reply,
            Ok(Err(err)) => err.into(),
            Err(payload) => panic_message(&*payload).into(),
        };

        tracing::error!(%method, path, route = route.path(), error = %failure, "route handler failed");

        self.dispatch_error()
    }

    /// Dispatches with the given method and path, using `GET` and `/` for whichever is missing or empty.
    pub fn dispatch_or_default(&mut self, method: Option<&Method>, path: Option<&str>) -> T {
        let method = method.unwrap_or(&DEFAULT_METHOD).clone();
        let path = path.filter(|path| !path.is_empty()).unwrap_or(DEFAULT_PATH);

        self.dispatch(&method, path)
    }

    /// Dispatches a [`Request`] using its method and its raw URI path.
    ///
    /// The path is matched still percent-encoded, so an encoded `/` stays inside its segment. Handlers decode captured
    /// values with [`RouteParams::get_decoded`](./struct.RouteParams.html#method.get_decoded).
    pub fn dispatch_request<B>(&mut self, req: &Request<B>) -> T {
        self.dispatch_or_default(Some(req.method()), Some(req.uri().path()))
    }

    /// Replies with the `400` error handler.
    pub fn dispatch_not_allowed(&mut self) -> T {
        self.dispatch_status(StatusCode::BAD_REQUEST, NOT_ALLOWED_TEXT)
    }

    /// Replies with the `404` error handler.
    pub fn dispatch_not_found(&mut self) -> T {
        self.dispatch_status(StatusCode::NOT_FOUND, NOT_FOUND_TEXT)
    }

    /// Replies with the `500` error handler.
    pub fn dispatch_error(&mut self) -> T {
        self.dispatch_status(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_TEXT)
    }

    fn dispatch_status(&mut self, status: StatusCode, text: &'static str) -> T {
        let handler = self.error_handlers.entry(status).or_insert_with(|| {
            let stub: ErrorHandler<T> = Box::new(move || T::stub(status, text));
            stub
        });

        handler()
    }

    /// Returns the route selected by the last successful dispatch.
    pub fn current(&self) -> Option<&Route<T, E>> {
        self.current.and_then(|idx| self.routes.get(idx))
    }

    /// Returns the registered routes in matching order.
    pub fn routes(&self) -> &[Route<T, E>] {
        &self.routes
    }

    /// Returns the raw path of every registered route in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.routes.iter().map(Route::path)
    }

    /// Generates the path of the first route carrying `name`.
    ///
    /// Every `{key}` and `{key?}` token is replaced by the stringified value supplied for `key`, in the order the
    /// parameters are given. Tokens left without a value are removed and the resulting path is not normalised, so
    /// leaving out a required parameter in the middle of a path yields an empty segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use routerlet::Router;
    /// use std::convert::Infallible;
    ///
    /// let mut router: Router<String, Infallible> = Router::new();
    /// router.get("/users/{id}/profile", || Ok("profile".to_owned())).set_name("profile");
    ///
    /// assert_eq!(router.route("profile", [("id", 5)]).unwrap(), "/users/5/profile");
    /// assert_eq!(router.route("profile", Vec::<(&str, u32)>::new()).unwrap(), "/users//profile");
    /// assert!(router.route("missing-name", Vec::<(&str, u32)>::new()).is_err());
    /// ```
    pub fn route<I, K, V>(&self, name: &str, parameters: I) -> crate::Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let route = self
            .routes
            .iter()
            .find(|route| route.name() == Some(name))
            .ok_or_else(|| Error::NoSuchNamedRoute(name.to_owned()))?;

        let mut path = route.path().to_owned();
        for (key, val) in parameters {
            let key = key.as_ref();
            let val = val.to_string();
            path = path.replace(&format!("{{{}}}", key), &val);
            path = path.replace(&format!("{{{}?}}", key), &val);
        }

        Ok(strip_placeholders(&path))
    }

    /// Builds a `301 Moved Permanently` response to `location`, see [`redirect`](./fn.redirect.html).
    pub fn redirect(&self, location: &str) -> crate::Result<Response<Full<Bytes>>> {
        reply::redirect(location)
    }
}

impl<T: Reply + 'static, E: Into<RouteError> + 'static> Default for Router<T, E> {
    fn default() -> Self {
        Router::new()
    }
}

impl<T, E> Debug for Router<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<u16> = self.error_handlers.keys().map(StatusCode::as_u16).collect();
        codes.sort_unstable();

        write!(
            f,
            "{{ routes: {:#?}, error_handlers: {:?}, current: {:?} }}",
            self.routes, codes, self.current
        )
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("handler panicked: {}", msg)
    } else {
        "handler panicked".to_owned()
    }
}

use crate::helpers::normalise_path;
use crate::regex_generator::{generate_param_match_regex, ParamMatcher};
use crate::types::{RouteMatch, RouteParams};
use hyper::Method;
use std::fmt::{self, Debug, Formatter};
use std::sync::OnceLock;

pub(crate) type Handler<T, E> = Box<dyn Fn(&RouteParams) -> Result<T, E> + Send + Sync + 'static>;

/// Represents a single route.
///
/// A route consists of an http method, a path pattern and a handler. It shouldn't be created directly, use
/// [`Router::add`](./struct.Router.html#method.add) and its shorthands to register one.
///
/// The path pattern is made of `/`-separated segments. A segment `{name}` captures one or more non-`/` characters,
/// a segment `{name?}` captures zero or more, and every other segment must match literally.
///
/// This `Route<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the reply type produced by the handler.
/// * The `E` represents the error type a failing handler returns.
///
/// The parameters captured by [`matches`](Self::matches) describe the last successful match only, so read them
/// right after the match that produced them.
pub struct Route<T, E> {
    method: Method,
    path: String,
    handler: Handler<T, E>,
    parameters: RouteParams,
    name: Option<String>,
    // Compiled on the first pattern match attempt, `None` when the path can only match exactly.
    matcher: OnceLock<Option<ParamMatcher>>,
}

impl<T, E> Route<T, E> {
    pub(crate) fn new<P: Into<String>>(method: Method, path: P, handler: Handler<T, E>) -> Route<T, E> {
        Route {
            method,
            path: path.into(),
            handler,
            parameters: RouteParams::new(),
            name: None,
            matcher: OnceLock::new(),
        }
    }

    /// Returns the http method this route answers to.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw path pattern this route was registered with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the parameters captured by the last successful [`matches`](Self::matches) call.
    pub fn parameters(&self) -> &RouteParams {
        &self.parameters
    }

    /// Returns the name given to this route, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Names this route so a path can be generated for it with [`Router::route`](./struct.Router.html#method.route).
    ///
    /// An empty name is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use routerlet::Router;
    /// use std::convert::Infallible;
    ///
    /// let mut router: Router<String, Infallible> = Router::new();
    /// router
    ///     .get("/users/{id}/profile", || Ok("profile".to_owned()))
    ///     .set_name("profile");
    ///
    /// assert_eq!(router.route("profile", [("id", 5)]).unwrap(), "/users/5/profile");
    /// ```
    pub fn set_name<N: Into<String>>(&mut self, name: N) -> &mut Route<T, E> {
        let name = name.into();
        if !name.is_empty() {
            self.name = Some(name);
        }
        self
    }

    /// Checks the method and the path against this route and, on success, stores the captured parameters.
    pub fn matches(&mut self, method: &Method, path: &str) -> bool {
        match self.match_path(method, path) {
            Some(route_match) => {
                self.parameters = route_match.into_params();
                true
            }
            None => false,
        }
    }

    /// Checks the method and the path against this route without touching its state.
    ///
    /// A byte-identical method and path match right away with no parameters. Otherwise both paths are normalised and
    /// the request path is matched against the compiled pattern.
    pub fn match_path(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        if *method != self.method {
            return None;
        }

        if path == self.path {
            tracing::trace!(route = %self.path, "exact route match");
            return Some(RouteMatch::default());
        }

        let params = self.matcher()?.captures(&normalise_path(path))?;
        tracing::trace!(route = %self.path, path, params = ?params, "pattern route match");

        Some(RouteMatch::with_params(params))
    }

    /// Invokes the handler with the parameters of the last successful match.
    ///
    /// A handler failure is returned as is.
    pub fn dispatch(&self) -> Result<T, E> {
        (self.handler)(&self.parameters)
    }

    fn matcher(&self) -> Option<&ParamMatcher> {
        self.matcher
            .get_or_init(|| match generate_param_match_regex(self.path.as_str()) {
                Ok(matcher) => matcher,
                Err(err) => {
                    tracing::warn!(route = %self.path, error = %err, "could not compile the route path, it can only match exactly");
                    None
                }
            })
            .as_ref()
    }
}

impl<T, E> Debug for Route<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let param_names = self.matcher.get().and_then(Option::as_ref).map(ParamMatcher::names);
        write!(
            f,
            "{{ method: {:?}, path: {:?}, name: {:?}, param_names: {:?}, parameters: {:?} }}",
            self.method, self.path, self.name, param_names, self.parameters
        )
    }
}

use crate::helpers::percent_decode_value;
use std::collections::HashMap;

/// Represents a map of the route parameters captured by the last successful match of a route.
///
/// A parameter whose segment was empty (an optional `{name?}` segment left out of the request path) is kept in the
/// map with an absent value, so [`contains`](Self::contains) and [`get`](Self::get) tell the two cases apart.
///
/// # Examples
///
/// ```
/// use routerlet::RouteParams;
///
/// let mut params = RouteParams::new();
/// params.set("id", Some("42".to_owned()));
/// params.set("page", None);
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("page"), None);
/// assert!(params.contains("page"));
/// assert!(!params.contains("slug"));
///
/// params.set("path", Some("docs%2Fintro".to_owned()));
/// assert_eq!(params.get("path"), Some("docs%2Fintro"));
/// assert_eq!(params.get_decoded("path").unwrap().as_deref(), Some("docs/intro"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, Option<String>>);

impl RouteParams {
    /// Creates an empty route parameters map.
    pub fn new() -> RouteParams {
        RouteParams(HashMap::new())
    }

    /// Creates an empty route parameters map with the specified capacity.
    pub fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(HashMap::with_capacity(capacity))
    }

    /// Sets a new parameter entry, replacing any previous value for the same name.
    pub fn set<N: Into<String>>(&mut self, param_name: N, param_val: Option<String>) {
        self.0.insert(param_name.into(), param_val);
    }

    /// Returns the captured value of a parameter, if the parameter exists and captured a non-empty segment.
    pub fn get<N: AsRef<str>>(&self, param_name: N) -> Option<&str> {
        self.0.get(param_name.as_ref()).and_then(|val| val.as_deref())
    }

    /// Returns the percent-decoded value of a parameter.
    ///
    /// Values are captured from the raw request path, so `a%2Fb` decodes to `a/b` here. Fails when the decoded bytes
    /// are not UTF-8.
    pub fn get_decoded<N: AsRef<str>>(&self, param_name: N) -> crate::Result<Option<String>> {
        self.get(param_name).map(percent_decode_value).transpose()
    }

    /// Checks whether the route declares a parameter with this name, whatever its captured value.
    pub fn contains<N: AsRef<str>>(&self, param_name: N) -> bool {
        self.0.contains_key(param_name.as_ref())
    }

    /// Returns the total number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the parameter names and their captured values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(name, val)| (name.as_str(), val.as_deref()))
    }
}

/// The outcome of a successful route match: the parameters extracted from the request path.
///
/// A match through the exact-equality fast path carries no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatch {
    params: RouteParams,
}

impl RouteMatch {
    pub(crate) fn with_params(params: RouteParams) -> RouteMatch {
        RouteMatch { params }
    }

    /// Returns the parameters captured by this match.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Consumes the match and returns its parameters.
    pub fn into_params(self) -> RouteParams {
        self.params
    }
}

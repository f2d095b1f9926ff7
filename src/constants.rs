use hyper::Method;

pub(crate) const DEFAULT_METHOD: Method = Method::GET;
pub(crate) const DEFAULT_PATH: &str = "/";

pub(crate) const NOT_ALLOWED_TEXT: &str = "not allowed";
pub(crate) const NOT_FOUND_TEXT: &str = "not found";
pub(crate) const SERVER_ERROR_TEXT: &str = "server error";

pub(crate) const PATH_SEPARATOR: char = '/';

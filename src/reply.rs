use crate::Error;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};

/// The reply type produced by the route handlers and the error handlers of a [`Router`](./struct.Router.html).
///
/// `stub` builds the built-in `400`, `404` and `500` replies used until an error handler is registered for those
/// codes, `into_response` turns a reply into the response written back by [`RouterService`](./struct.RouterService.html).
pub trait Reply: Sized {
    /// Builds the default reply for a status code with a short text body.
    fn stub(status: StatusCode, text: &'static str) -> Self;

    /// Converts the reply into the response written back to the client.
    fn into_response(self) -> Response<Full<Bytes>>;
}

impl Reply for String {
    fn stub(_: StatusCode, text: &'static str) -> Self {
        text.to_owned()
    }

    fn into_response(self) -> Response<Full<Bytes>> {
        Response::new(Full::from(self))
    }
}

impl Reply for &'static str {
    fn stub(_: StatusCode, text: &'static str) -> Self {
        text
    }

    fn into_response(self) -> Response<Full<Bytes>> {
        Response::new(Full::from(self))
    }
}

impl Reply for Bytes {
    fn stub(_: StatusCode, text: &'static str) -> Self {
        Bytes::from_static(text.as_bytes())
    }

    fn into_response(self) -> Response<Full<Bytes>> {
        Response::new(Full::new(self))
    }
}

impl Reply for Response<Full<Bytes>> {
    fn stub(status: StatusCode, text: &'static str) -> Self {
        let mut res = Response::new(Full::from(text));
        *res.status_mut() = status;
        res
    }

    fn into_response(self) -> Response<Full<Bytes>> {
        self
    }
}

/// Builds a `301 Moved Permanently` response pointing at `location`.
///
/// Returning it from a handler ends the processing of the request.
///
/// # Examples
///
/// ```
/// use hyper::{header, StatusCode};
///
/// let res = routerlet::redirect("/login").unwrap();
/// assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
/// assert_eq!(res.headers()[header::LOCATION], "/login");
/// ```
pub fn redirect(location: &str) -> crate::Result<Response<Full<Bytes>>> {
    let value = HeaderValue::from_str(location).map_err(|source| Error::InvalidRedirect {
        location: location.to_owned(),
        source,
    })?;

    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = StatusCode::MOVED_PERMANENTLY;
    res.headers_mut().insert(header::LOCATION, value);

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn into_text(res: Response<Full<Bytes>>) -> String {
        String::from_utf8_lossy(&res.into_body().collect().await.unwrap().to_bytes()).to_string()
    }

    #[tokio::test]
    async fn should_build_response_stub_with_status() {
        let res = <Response<Full<Bytes>> as Reply>::stub(StatusCode::NOT_FOUND, "not found");
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(into_text(res).await, "not found");
    }

    #[tokio::test]
    async fn should_convert_text_replies() {
        let res = String::stub(StatusCode::BAD_REQUEST, "not allowed").into_response();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(into_text(res).await, "not allowed");

        let res = Bytes::from_static(b"raw").into_response();
        assert_eq!(into_text(res).await, "raw");
    }

    #[test]
    fn should_redirect_permanently() {
        let res = redirect("/users/5").unwrap();
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[header::LOCATION], "/users/5");
    }

    #[test]
    fn should_reject_invalid_redirect_location() {
        let err = redirect("/bad\nlocation").unwrap_err();
        assert!(matches!(err, Error::InvalidRedirect { .. }));
    }
}

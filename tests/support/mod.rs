#![allow(dead_code)]

use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::service::Service;
use hyper::{Method, Request, Response};
use routerlet::{RouteError, Router, RouterService};
use std::convert::Infallible;

pub type TextRouter = Router<String, RouteError>;
pub type ResponseRouter = Router<Response<Full<Bytes>>, RouteError>;

pub fn new_request(method: &str, route: &str) -> Request<Empty<Bytes>> {
    Request::builder()
        .method(Method::from_bytes(method.to_ascii_uppercase().as_bytes()).unwrap())
        .uri(route)
        .body(Empty::new())
        .unwrap()
}

/// Sends one request through a service building its routers with `factory` and returns the response.
pub async fn send<F, T>(factory: F, method: &str, route: &str) -> Response<Full<Bytes>>
where
    F: Fn() -> Router<T, RouteError>,
    T: routerlet::Reply + 'static,
{
    let service = RouterService::new(factory);
    let res: Result<_, Infallible> = service.call(new_request(method, route)).await;
    res.unwrap()
}

pub async fn into_text<B>(body: B) -> String
where
    B: hyper::body::Body<Data = Bytes> + Send,
    B::Error: std::fmt::Debug,
{
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).to_string()
}

use crate::error::RouteError;
use crate::reply::Reply;
use crate::router::Router;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::service::Service;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::fmt::{self, Debug, Formatter};
use std::future::{ready, Ready};
use std::marker::PhantomData;
use std::sync::Arc;

/// A [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) to process incoming requests.
///
/// The service holds a router factory rather than a router: every request gets a freshly built
/// [`Router`](./struct.Router.html), which is dispatched with the request method and path and then dropped, so no
/// per-dispatch state is ever shared between requests. The reply is turned into a response with
/// [`Reply::into_response`](./trait.Reply.html#tymethod.into_response).
///
/// # Examples
///
/// ```no_run
/// use hyper_util::rt::{TokioExecutor, TokioIo};
/// use hyper_util::server::conn::auto::Builder;
/// use routerlet::{Router, RouterService};
/// use std::convert::Infallible;
/// use std::net::SocketAddr;
/// use tokio::net::TcpListener;
///
/// fn router() -> Router<String, Infallible> {
///     let mut router = Router::new();
///     router.get("/", || Ok("Home page".to_owned()));
///     router
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let service = RouterService::new(|| router());
///
///     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
///     let listener = TcpListener::bind(addr).await?;
///
///     loop {
///         let (stream, _) = listener.accept().await?;
///         let service = service.clone();
///
///         tokio::spawn(async move {
///             let io = TokioIo::new(stream);
///             let builder = Builder::new(TokioExecutor::new());
///             if let Err(err) = builder.serve_connection(io, service).await {
///                 eprintln!("Error serving connection: {:?}", err);
///             }
///         });
///     }
/// }
/// ```
pub struct RouterService<F, T, E> {
    factory: Arc<F>,
    _reply: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> RouterService<F, T, E>
where
    F: Fn() -> Router<T, E>,
    T: Reply + 'static,
    E: Into<RouteError> + 'static,
{
    /// Creates a new service building its routers with `factory`.
    pub fn new(factory: F) -> RouterService<F, T, E> {
        RouterService {
            factory: Arc::new(factory),
            _reply: PhantomData,
        }
    }
}

impl<F, T, E> Clone for RouterService<F, T, E> {
    fn clone(&self) -> Self {
        RouterService {
            factory: self.factory.clone(),
            _reply: PhantomData,
        }
    }
}

impl<F, T, E, B> Service<Request<B>> for RouterService<F, T, E>
where
    F: Fn() -> Router<T, E>,
    T: Reply + 'static,
    E: Into<RouteError> + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let mut router = (self.factory)();
        let reply = router.dispatch_request(&req);

        ready(Ok(reply.into_response()))
    }
}

impl<F, T, E> Debug for RouterService<F, T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("RouterService { .. }")
    }
}

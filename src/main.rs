use http_body_util::Full;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use routerlet::{RouteError, RouteParams, Router, RouterService};
use std::convert::Infallible;
use std::env;
use std::future::Ready;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type Reply = Response<Full<Bytes>>;

const ADDR_ENV: &str = "ROUTERLET_ADDR";

// A handler for "/" page.
fn home_handler() -> Result<Reply, RouteError> {
    Ok(Response::new(Full::from("Home page")))
}

// A handler for "/users/{id}" page.
fn user_handler(params: &RouteParams) -> Result<Reply, RouteError> {
    let user_id = params.get_decoded("id")?.unwrap_or_default();
    Ok(Response::new(Full::from(format!("Hello {}", user_id))))
}

// A handler for "/posts/{page?}", the page segment may be left out.
fn posts_handler(params: &RouteParams) -> Result<Reply, RouteError> {
    let page = params.get("page").unwrap_or("1");
    Ok(Response::new(Full::from(format!("Posts, page {}", page))))
}

fn error_reply(status: StatusCode, text: &'static str) -> Reply {
    let mut res = Response::new(Full::from(text));
    *res.status_mut() = status;
    res
}

fn router() -> Router<Reply, RouteError> {
    let mut router: Router<Reply, RouteError> = Router::new();

    router.get("/", home_handler).set_name("home");
    router
        .add_with_params(Method::GET, "/users/{id}", user_handler)
        .set_name("user");
    router.add_with_params(Method::GET, "/posts/{page?}", posts_handler);
    router.post("/login", || Ok(Response::new(Full::from("Logged in"))));
    router.get("/old-home", || Ok(routerlet::redirect("/")?));
    router.get("/failing", || Err("this handler always fails".into()));

    router
        .error_handler(StatusCode::BAD_REQUEST, || {
            error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
        })
        .error_handler(StatusCode::NOT_FOUND, || {
            error_reply(StatusCode::NOT_FOUND, "Page Not Found")
        })
        .error_handler(StatusCode::INTERNAL_SERVER_ERROR, || {
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
        });

    router
}

// Hides the concrete service type behind its trait bounds, so the spawned connection futures don't have to
// re-prove the router's trait bounds with erased lifetimes.
fn router_service() -> impl Service<
    Request<Incoming>,
    Response = Response<Full<Bytes>>,
    Error = Infallible,
    Future = Ready<Result<Response<Full<Bytes>>, Infallible>>,
> + Clone
       + Send
       + Sync
       + 'static {
    RouterService::new(|| router())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "routerlet=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The address on which the server will be listening.
    let addr = match env::var(ADDR_ENV) {
        Ok(val) => val.parse::<SocketAddr>()?,
        Err(_) => SocketAddr::from(([127, 0, 0, 1], 3001)),
    };

    // Every request is dispatched on a router built by this factory.
    let service = router_service();

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "App is running");

    loop {
        let (stream, remote_addr) = listener.accept().await?;
        let service = service.clone();

        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let builder = Builder::new(TokioExecutor::new());

            if let Err(err) = builder.serve_connection(io, service).await {
                tracing::error!(%remote_addr, "Error serving connection: {:?}", err);
            }
        });
    }
}

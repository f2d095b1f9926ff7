use hyper::{Method, StatusCode};
use routerlet::{Error, RouteError, Router};

mod support;
use support::TextRouter;

fn router() -> TextRouter {
    let mut router: TextRouter = Router::new();

    router.get("/", || Ok("home".to_owned())).set_name("home");
    router.get("/about", || Ok("about".to_owned())).set_name("about");
    router
        .add_with_params(Method::GET, "/users/{id}", |params| {
            Ok(format!("user {}", params.get("id").unwrap_or("?")))
        })
        .set_name("user");
    router.get("/users/{id}/profile", || Ok("profile".to_owned())).set_name("profile");
    router.post("/users", || Ok("created".to_owned()));
    router.get("/broken", || Err(RouteError::from("broken handler")));

    router
}

#[test]
fn should_match_every_route_with_its_own_method_and_path() {
    let router = router();

    for route in router.routes() {
        let route_match = route.match_path(route.method(), route.path());
        assert!(route_match.is_some(), "{} {} should match itself", route.method(), route.path());
        assert!(route_match.unwrap().params().is_empty());
    }
}

#[test]
fn should_dispatch_raw_pattern_path_to_its_route() {
    let mut router = router();

    assert_eq!(router.dispatch(&Method::GET, "/users/{id}"), "user ?");
    assert_eq!(router.current().unwrap().path(), "/users/{id}");
}

#[test]
fn should_capture_and_reject_extra_segments() {
    let mut router = router();

    assert_eq!(router.dispatch(&Method::GET, "/users/42"), "user 42");
    assert_eq!(router.current().unwrap().parameters().get("id"), Some("42"));

    assert_eq!(router.dispatch(&Method::GET, "/users/42/edit"), "not found");
}

#[test]
fn should_capture_optional_segments() {
    let mut router: TextRouter = Router::new();
    router.add_with_params(Method::GET, "/users/{id?}", |params| {
        Ok(params.get("id").unwrap_or("everyone").to_owned())
    });

    assert_eq!(router.dispatch(&Method::GET, "/users/"), "everyone");
    let params = router.current().unwrap().parameters();
    assert!(params.contains("id"));
    assert_eq!(params.get("id"), None);

    assert_eq!(router.dispatch(&Method::GET, "/users/7"), "7");
}

#[test]
fn should_match_parameterless_paths_exactly() {
    let mut router = router();

    assert_eq!(router.dispatch(&Method::GET, "/about"), "about");
    assert_eq!(router.dispatch(&Method::GET, "/about/"), "not found");
    assert_eq!(router.dispatch(&Method::GET, "about"), "not found");
}

#[test]
fn should_prefer_registration_order() {
    let mut router: TextRouter = Router::new();
    router.get("/files/{name}", || Ok("by name".to_owned()));
    router.get("/files/{name?}", || Ok("by optional name".to_owned()));
    router.get("/files/readme", || Ok("readme".to_owned()));

    assert_eq!(router.dispatch(&Method::GET, "/files/readme"), "by name");
    assert_eq!(router.dispatch(&Method::GET, "/files/"), "by optional name");
}

#[test]
fn should_reply_with_status_class_handlers() {
    let mut router = router();

    assert_eq!(router.dispatch(&Method::DELETE, "/users"), "not allowed");
    assert_eq!(router.dispatch(&Method::GET, "/users"), "not allowed");
    assert_eq!(router.dispatch(&Method::POST, "/users/{id}"), "not allowed");
    assert_eq!(router.dispatch(&Method::POST, "/users/42"), "not found");
    assert_eq!(router.dispatch(&Method::GET, "/contact"), "not found");
    assert_eq!(router.dispatch(&Method::GET, "/broken"), "server error");

    router
        .error_handler(StatusCode::BAD_REQUEST, || "400".to_owned())
        .error_handler(StatusCode::NOT_FOUND, || "404".to_owned())
        .error_handler(StatusCode::INTERNAL_SERVER_ERROR, || "500".to_owned());

    assert_eq!(router.dispatch(&Method::GET, "/users"), "400");
    assert_eq!(router.dispatch(&Method::GET, "/contact"), "404");
    assert_eq!(router.dispatch(&Method::GET, "/broken"), "500");
}

#[test]
fn should_keep_current_route_for_failed_handler() {
    let mut router = router();

    assert_eq!(router.dispatch(&Method::GET, "/broken"), "server error");
    assert_eq!(router.current().unwrap().path(), "/broken");
}

#[test]
fn should_generate_paths_for_named_routes() {
    let router = router();

    assert_eq!(router.route("profile", [("id", 5)]).unwrap(), "/users/5/profile");
    assert_eq!(router.route("profile", Vec::<(&str, u8)>::new()).unwrap(), "/users//profile");
    assert_eq!(router.route("user", [("id", "alice")]).unwrap(), "/users/alice");
    assert_eq!(router.route("home", Vec::<(&str, u8)>::new()).unwrap(), "/");
}

#[test]
fn should_fail_for_missing_route_name() {
    let router = router();

    match router.route("missing-name", Vec::<(&str, u8)>::new()) {
        Err(Error::NoSuchNamedRoute(name)) => assert_eq!(name, "missing-name"),
        other => panic!("expected a missing route error, got {:?}", other),
    }
}

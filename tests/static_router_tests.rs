#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use brrtdispatch::{DispatchError, ErrorKind, Router, StaticRouter};
use common::fixtures::install_pet_store;
use http::{Method, Uri};

#[test]
fn test_same_registrations_in_both_tables() {
    let mut dynamic = Router::new();
    let mut exact = StaticRouter::new();
    install_pet_store(&mut dynamic);
    install_pet_store(&mut exact);

    // literal paths resolve identically
    for (method, path) in [("GET", "/pets"), ("POST", "/pets"), ("GET", "/health")] {
        assert_eq!(
            *dynamic.select(path, method).unwrap().handler,
            *exact.select(path, method).unwrap()
        );
    }

    // the static table has no parameter semantics
    assert_eq!(*dynamic.select("/pets/7", "GET").unwrap().handler, "get_pet");
    assert_eq!(
        exact.select("/pets/7", "GET").unwrap_err(),
        DispatchError::PathNotRegistered {
            method: "GET".into(),
            path: "/pets/7".into(),
        }
    );
    assert_eq!(exact.select("/pets/:id", "GET"), Ok(&"get_pet"));
}

#[test]
fn test_reregistration_replaces_handler() {
    let mut router = StaticRouter::new();
    router.route("/health").get("v1");
    router.route("/health").get("v2").head("v2_head");

    assert_eq!(router.select("/health", "GET"), Ok(&"v2"));
    assert_eq!(router.select("/health", "HEAD"), Ok(&"v2_head"));
    assert_eq!(router.len(), 2);
}

#[test]
fn test_error_order() {
    let mut router = StaticRouter::new();
    router.route("/a").get(());

    assert_eq!(
        router.select("/a", "POST").unwrap_err().kind(),
        ErrorKind::MethodNotRegistered
    );
    assert_eq!(
        router.select("/b", "GET").unwrap_err().kind(),
        ErrorKind::PathNotRegistered
    );
    assert_eq!(
        router.select("/b", "GET").unwrap_err().to_string(),
        "path not registered for GET: /b"
    );
}

#[test]
fn test_select_uri_ignores_query() {
    let mut router = StaticRouter::new();
    router.route("/metrics").get("metrics");

    let uri: Uri = "http://localhost:8080/metrics?format=prometheus".parse().unwrap();
    assert_eq!(router.select_uri(&Method::GET, &uri), Ok(&"metrics"));
}

#[test]
fn test_allowed_for_405() {
    let mut router = StaticRouter::new();
    router.route("/items").get(1).post(2).options(3);

    assert_eq!(router.allowed("/items"), vec!["POST", "GET", "OPTIONS"]);
    assert!(router.allowed("/items/").is_empty());
}

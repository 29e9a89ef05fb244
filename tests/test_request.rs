use dirserve::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

fn request(method: Method, directory: &str) -> Request {
    let mut headers = HashMap::new();
    headers.insert("Host".to_string(), "example.com".to_string());

    Request {
        method,
        directory: directory.to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
    }
}

#[test]
fn test_request_header_retrieval() {
    let req = request(Method::GET, "");

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_field_lookup() {
    let req = request(Method::GET, "/docs");

    assert_eq!(req.field("Method"), Some("GET"));
    assert_eq!(req.field("Directory"), Some("/docs"));
    assert_eq!(req.field("HTTP"), Some("HTTP/1.1"));
    assert_eq!(req.field("Host"), Some("example.com"));
    assert_eq!(req.field("Accept"), None);
}

#[test]
fn test_request_path_of_root() {
    let req = request(Method::GET, "");

    assert_eq!(req.path(), "/");
    assert_eq!(req.request_line(), "GET / HTTP/1.1");
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::parse("GET"), Method::GET);
    assert_eq!(Method::parse("POST"), Method::POST);
    assert_eq!(Method::parse("DELETE"), Method::DELETE);
    assert_eq!(Method::parse("get"), Method::Other("get".to_string())); // Case-sensitive
}

#[test]
fn test_request_method_display() {
    assert_eq!(Method::PATCH.to_string(), "PATCH");
    assert_eq!(Method::Other("BREW".to_string()).to_string(), "BREW");
}

#[test]
fn test_only_get_is_retrieval() {
    assert!(Method::GET.is_retrieval());

    for m in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD, Method::OPTIONS, Method::PATCH] {
        assert!(!m.is_retrieval());
    }
    assert!(!Method::Other("GETX".to_string()).is_retrieval());
}

#[test]
fn test_request_builder_normalizes_root() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .build()
        .unwrap();

    assert_eq!(req.directory, "");
    assert_eq!(req.version, "HTTP/1.1");
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

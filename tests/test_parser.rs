use dirserve::http::parser::{parse_request, ParseError};
use dirserve::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = "GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.directory, "");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
}

#[test]
fn test_parse_request_without_headers() {
    let parsed = parse_request("GET /a.txt HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(parsed.directory, "/a.txt");
    assert!(parsed.headers.is_empty());
}

#[test]
fn test_parse_keeps_leading_slash_on_non_root_paths() {
    for path in ["/docs", "/docs/", "/docs/readme.md", "//x", "/?q=1"] {
        let req = format!("GET {} HTTP/1.1\r\n\r\n", path);
        let parsed = parse_request(&req).unwrap();
        assert_eq!(parsed.directory, path);
    }
}

#[test]
fn test_parse_multiple_headers() {
    let req = "GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let req = "GET / HTTP/1.1\r\nX-Tag: first\r\nX-Tag: second\r\n\r\n";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.header("X-Tag"), Some("second"));
}

#[test]
fn test_parse_bare_newlines() {
    let parsed = parse_request("GET /x HTTP/1.0\nHost: h\n\n").unwrap();

    assert_eq!(parsed.directory, "/x");
    assert_eq!(parsed.version, "HTTP/1.0");
    assert_eq!(parsed.header("Host"), Some("h"));
}

#[test]
fn test_parse_unknown_method_is_kept() {
    let parsed = parse_request("BREW /pot HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(parsed.method, Method::Other("BREW".to_string()));
}

#[test]
fn test_parse_empty_request() {
    assert_eq!(parse_request("").unwrap_err(), ParseError::Empty);
    assert_eq!(parse_request("\r\n\r\n").unwrap_err(), ParseError::Empty);
}

#[test]
fn test_parse_request_line_with_too_few_tokens() {
    let result = parse_request("GET /\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidRequestLine(_))));
}

#[test]
fn test_parse_request_line_with_too_many_tokens() {
    let result = parse_request("GET / HTTP/1.1 extra\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidRequestLine(_))));
}

#[test]
fn test_parse_malformed_header() {
    let result = parse_request("GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
}

#[test]
fn test_parse_header_without_space_after_colon() {
    let result = parse_request("GET / HTTP/1.1\r\nHost:example.com\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
}

#[test]
fn test_parse_header_value_with_colon_but_no_second_separator() {
    let parsed = parse_request("GET / HTTP/1.1\r\nReferer: http://h:80/x\r\n\r\n").unwrap();

    assert_eq!(parsed.header("Referer"), Some("http://h:80/x"));
}

#[test]
fn test_request_line_round_trip() {
    let lines = [
        "GET / HTTP/1.1",
        "GET /a/b.txt HTTP/1.0",
        "POST /api HTTP/1.1",
        "BREW /pot HTCPCP/1.0",
    ];

    for line in lines {
        let parsed = parse_request(&format!("{}\r\nHost: x\r\n\r\n", line)).unwrap();
        assert_eq!(parsed.request_line(), line);
    }
}

#[test]
fn test_parse_ignores_bytes_after_header_block() {
    let req = "POST /api HTTP/1.1\r\nContent-Length: 7\r\n\r\npayload";
    let parsed = parse_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.headers.len(), 1);
}

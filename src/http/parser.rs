use crate::http::request::{normalize_directory, Method, Request};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No request line at all
    Empty,
    /// The request line does not have exactly three tokens
    InvalidRequestLine(String),
    /// A header line without exactly one `": "` separator
    InvalidHeader(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty request"),
            ParseError::InvalidRequestLine(line) => write!(f, "invalid request line: {:?}", line),
            ParseError::InvalidHeader(line) => write!(f, "invalid header line: {:?}", line),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses the complete request text.
///
/// The first line must be `METHOD PATH VERSION`; every following line up to
/// the first blank one must be `Key: Value` with the separator appearing
/// exactly once.
pub fn parse_request(text: &str) -> Result<Request, ParseError> {
    let mut lines = text.trim_end().lines();

    let request_line = lines.next().filter(|l| !l.trim().is_empty()).ok_or(ParseError::Empty)?;

    let tokens: Vec<&str> = request_line.split_whitespace().collect();
    let [method, path, version] = tokens.as_slice() else {
        return Err(ParseError::InvalidRequestLine(request_line.to_string()));
    };

    let mut headers = HashMap::new();

    for line in lines {
        // Anything after the header block is a body, which is never read
        if line.is_empty() {
            break;
        }

        let mut parts = line.split(": ");
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseError::InvalidHeader(line.to_string()));
        };

        headers.insert(key.to_string(), value.to_string());
    }

    Ok(Request {
        method: Method::parse(method),
        directory: normalize_directory(path.to_string()),
        version: version.to_string(),
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = "GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request(req).unwrap();

        assert_eq!(parsed.directory, "");
        assert_eq!(parsed.header("Host"), Some("example.com"));
    }

    #[test]
    fn header_with_extra_separator_is_rejected() {
        let req = "GET / HTTP/1.1\r\nX-Note: a: b\r\n\r\n";

        assert!(matches!(parse_request(req), Err(ParseError::InvalidHeader(_))));
    }
}

use tokio::fs::File;

use crate::http::DEFAULT_VERSION;

/// HTTP status codes the server can emit.
///
/// - `Ok` (200): listing or file follows
/// - `BadRequest` (400): the request could not be decoded or parsed
/// - `NotFound` (404): nothing exists at the requested path
/// - `MethodNotAllowed` (405): anything other than GET
/// - `InternalServerError` (500): the filesystem failed while resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use dirserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// What follows the header block.
#[derive(Debug)]
pub enum Body {
    /// Header block only
    Empty,
    /// Text sent in the same payload as the headers
    Html(String),
    /// Raw file bytes, copied from the open handle after the headers
    File { file: File, len: u64 },
}

impl Body {
    /// Number of bytes the body puts on the wire.
    pub fn len(&self) -> u64 {
        match self {
            Body::Empty => 0,
            Body::Html(html) => html.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A response ready to be framed onto the connection.
///
/// Headers keep their insertion order so the header block is deterministic.
#[derive(Debug)]
pub struct Response {
    /// Version token echoed in the status line
    pub version: String,
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

/// Builder for constructing responses in a fluent style.
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .version("HTTP/1.0")
///     .header("Content-Type", "text/html")
///     .html(listing)
///     .build();
/// ```
pub struct ResponseBuilder {
    version: String,
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Body,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds a header, replacing the value of an existing one with the same
    /// name in place.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();

        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    pub fn html(mut self, html: String) -> Self {
        self.body = Body::Html(html);
        self
    }

    pub fn file(mut self, file: File, len: u64) -> Self {
        self.body = Body::File { file, len };
        self
    }

    pub fn build(self) -> Response {
        Response {
            version: self.version,
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A bodiless response that closes the connection.
    pub fn status_only(version: impl Into<String>, status: StatusCode) -> Self {
        ResponseBuilder::new(status)
            .version(version)
            .header("Connection", "close")
            .build()
    }

    pub fn not_found(version: impl Into<String>) -> Self {
        Self::status_only(version, StatusCode::NotFound)
    }

    pub fn method_not_allowed(version: impl Into<String>) -> Self {
        Self::status_only(version, StatusCode::MethodNotAllowed)
    }

    pub fn bad_request() -> Self {
        Self::status_only(DEFAULT_VERSION, StatusCode::BadRequest)
    }

    pub fn internal_error(version: impl Into<String>) -> Self {
        Self::status_only(version, StatusCode::InternalServerError)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

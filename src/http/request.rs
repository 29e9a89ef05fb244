use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// Only `GET` is served. Every other verb, known or not, is kept so the
/// request can still be answered with 405 Method Not Allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    /// Any other token found in the method position
    Other(String),
}

impl Method {
    /// Parses a method token. Matching is case-sensitive; unrecognised
    /// tokens become [`Method::Other`].
    ///
    /// ```
    /// # use dirserve::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s,
        }
    }

    /// Whether the server answers this method with content.
    pub fn is_retrieval(&self) -> bool {
        *self == Method::GET
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed client request.
///
/// Built once per connection and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Request {
    /// The request method
    pub method: Method,
    /// Request path; `/` is stored as the empty string, anything else keeps
    /// its leading slash
    pub directory: String,
    /// Protocol version token (typically "HTTP/1.1")
    pub version: String,
    /// Header lines as key-value pairs; a repeated key keeps its last value
    pub headers: HashMap<String, String>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    directory: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            directory: None,
            version: None,
            headers: HashMap::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the request path, applying the same `/` normalization as the
    /// parser.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.directory = Some(normalize_directory(path.into()));
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            directory: self.directory.ok_or("path missing")?,
            version: self
                .version
                .unwrap_or_else(|| crate::http::DEFAULT_VERSION.to_string()),
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps the bare root path to the empty directory.
pub fn normalize_directory(path: String) -> String {
    if path == "/" { String::new() } else { path }
}

impl Request {
    /// Retrieves a header value by exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Looks a field up the way a flat request mapping would: `Method`,
    /// `Directory` and `HTTP` name the request line tokens, every other
    /// name is a header.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "Method" => Some(self.method.as_str()),
            "Directory" => Some(&self.directory),
            "HTTP" => Some(&self.version),
            _ => self.header(name),
        }
    }

    /// The path as it appeared on the request line.
    pub fn path(&self) -> &str {
        if self.directory.is_empty() {
            "/"
        } else {
            &self.directory
        }
    }

    /// Re-serializes the request line without its terminator.
    pub fn request_line(&self) -> String {
        format!("{} {} {}", self.method, self.path(), self.version)
    }
}

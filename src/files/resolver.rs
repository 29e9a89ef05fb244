//! Request path resolution and response construction
//!
//! Every request path is interpreted relative to a single root directory
//! handed to the [`Resolver`] at construction.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::files::listing;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// A request path mapped onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Location on disk
    pub path: PathBuf,
    /// Root-relative path segments, already normalized
    pub segments: Vec<String>,
}

impl Target {
    /// Root-relative path without a leading slash; empty for the root.
    pub fn relative(&self) -> String {
        self.segments.join("/")
    }

    /// Link target of the parent directory. The root is its own parent.
    pub fn parent_href(&self) -> String {
        match self.segments.split_last() {
            Some((_, parent)) if !parent.is_empty() => format!("/{}", encode_segments(parent)),
            _ => "/".to_string(),
        }
    }

    /// Prefix that encoded entry names are appended to when linking
    /// children.
    pub fn child_prefix(&self) -> String {
        if self.segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", encode_segments(&self.segments))
        }
    }
}

fn encode_segments(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves requests against a fixed server root.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lexically maps a request directory onto the root.
    ///
    /// The path is percent-decoded first (left as is if it does not decode
    /// to UTF-8). Empty and `.` segments are dropped and `..` removes the
    /// previous segment, stopping at the root.
    pub fn resolve(&self, directory: &str) -> Target {
        let decoded = urlencoding::decode(directory)
            .map(|d| d.into_owned())
            .unwrap_or_else(|_| directory.to_string());

        let mut segments: Vec<String> = Vec::new();

        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(name.to_string()),
            }
        }

        let path = segments.iter().fold(self.root.clone(), |p, s| p.join(s));
        Target { path, segments }
    }

    /// Builds the response for a parsed request.
    ///
    /// Decision order: non-GET is 405, a missing target is 404, a directory
    /// gets an HTML listing, anything else is sent as a file. Filesystem
    /// failures other than "missing" are returned as errors.
    pub async fn respond(&self, req: &Request) -> Result<Response> {
        if !req.method.is_retrieval() {
            tracing::debug!(method = %req.method, "Rejecting non-GET request");
            return Ok(Response::method_not_allowed(&req.version));
        }

        let target = self.resolve(&req.directory);

        let metadata = match fs::metadata(&target.path).await {
            Ok(m) => m,
            Err(e) if is_missing(&e) => {
                tracing::debug!(path = %target.path.display(), "Target does not exist");
                return Ok(Response::not_found(&req.version));
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to stat {}", target.path.display()));
            }
        };

        if metadata.is_dir() {
            let html = listing::render(&target).await?;

            tracing::debug!(
                path = %target.path.display(),
                bytes = html.len(),
                "Rendered directory listing"
            );

            Ok(ResponseBuilder::new(StatusCode::Ok)
                .version(&req.version)
                .header("Content-Type", "text/html")
                .header("Content-Length", html.len().to_string())
                .header("Connection", "close")
                .html(html)
                .build())
        } else {
            let file = fs::File::open(&target.path)
                .await
                .with_context(|| format!("Failed to open {}", target.path.display()))?;
            let len = file
                .metadata()
                .await
                .with_context(|| format!("Failed to stat {}", target.path.display()))?
                .len();

            Ok(ResponseBuilder::new(StatusCode::Ok)
                .version(&req.version)
                .header("Content-Type", "application/octet-stream")
                .header("Content-Length", len.to_string())
                .header("Connection", "close")
                .file(file, len)
                .build())
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
const ELOOP: Option<i32> = Some(40);
#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
const ELOOP: Option<i32> = Some(62);
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
const ELOOP: Option<i32> = None;

/// Lookup failures meaning no entity can exist at the path: absent,
/// a file used as a directory, a NUL byte or overlong name, a symlink loop.
fn is_missing(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::NotFound
            | ErrorKind::NotADirectory
            | ErrorKind::InvalidInput
            | ErrorKind::InvalidFilename
    ) || (ELOOP.is_some() && e.raw_os_error() == ELOOP)
}

//! Outbound data helper
//!
//! Posts a text payload to a peer's `/api/{name}` endpoint and returns the
//! response body. Not used by the server itself.

use anyhow::{Context, Result};
use bytes::BytesMut;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use url::Url;

use crate::http::HEADER_TERMINATOR;

/// Port peers expose their API on
pub const API_PORT: u16 = 12800;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BUFFER_SIZE: usize = 8192;

/// POSTs `data` to `http://{ip}:12800/api/{api}` and returns the body text.
pub async fn send_data(ip: &str, api: &str, data: &str) -> Result<String> {
    send_data_to(&format!("http://{}:{}", ip, API_PORT), api, data).await
}

/// Same as [`send_data`] against an arbitrary `http://host:port` base.
pub async fn send_data_to(base: &str, api: &str, data: &str) -> Result<String> {
    let url = Url::parse(base)
        .and_then(|b| b.join(&format!("/api/{}", api)))
        .with_context(|| format!("Invalid API url {}/api/{}", base, api))?;

    let host = url.host_str().context("API url missing host")?;
    let port = url.port_or_known_default().unwrap_or(80);
    let addr = format!("{}:{}", host, port);

    let mut stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
        .await
        .context("Connection timeout")?
        .with_context(|| format!("Failed to connect to {}", addr))?;

    tracing::debug!(url = %url, bytes = data.len(), "Posting data");

    let request = build_post_request(&url, data);

    timeout(REQUEST_TIMEOUT, exchange(&mut stream, &request))
        .await
        .context("Request timeout")?
}

async fn exchange(stream: &mut TcpStream, request: &[u8]) -> Result<String> {
    stream.write_all(request).await?;
    stream.flush().await?;
    read_response_body(stream).await
}

/// Builds the raw POST request for `url` carrying `data`.
pub fn build_post_request(url: &Url, data: &str) -> Vec<u8> {
    let mut buffer = Vec::new();

    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    buffer.extend_from_slice(format!("POST {} HTTP/1.1\r\n", target).as_bytes());

    let host = url.host_str().unwrap_or_default();
    let host_value = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    buffer.extend_from_slice(format!("Host: {}\r\n", host_value).as_bytes());
    buffer.extend_from_slice(format!("Content-Length: {}\r\n", data.len()).as_bytes());
    buffer.extend_from_slice(b"Connection: close\r\n");
    buffer.extend_from_slice(b"\r\n");
    buffer.extend_from_slice(data.as_bytes());

    buffer
}

/// Reads a response and returns its body. The status is not inspected.
async fn read_response_body(stream: &mut TcpStream) -> Result<String> {
    let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);

    let headers_end = loop {
        if let Some(pos) = buffer
            .windows(HEADER_TERMINATOR.len())
            .position(|w| w == HEADER_TERMINATOR)
        {
            break pos;
        }

        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            anyhow::bail!("Connection closed before complete response received");
        }
    };

    let head = buffer.split_to(headers_end + HEADER_TERMINATOR.len());
    let head = std::str::from_utf8(&head).context("Invalid UTF-8 in response headers")?;

    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .context("Invalid status line")?;
    tracing::debug!(status = status, "Received response");

    let content_length = head
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("Content-Length"))
        .map(|(_, v)| v.trim().parse::<usize>().context("Invalid Content-Length"))
        .transpose()?;

    match content_length {
        Some(len) => {
            while buffer.len() < len {
                let n = stream.read_buf(&mut buffer).await?;
                if n == 0 {
                    anyhow::bail!("Connection closed before complete body received");
                }
            }
            buffer.truncate(len);
        }
        None => while stream.read_buf(&mut buffer).await? != 0 {},
    }

    String::from_utf8(buffer.to_vec()).context("Response body is not valid UTF-8")
}

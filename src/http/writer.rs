use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};
use crate::http::CRLF;

/// Frames the status line, headers and blank line.
///
/// An HTML body is appended to the same buffer; a file body is not.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}{}",
        resp.version,
        resp.status.as_u16(),
        resp.status.reason_phrase(),
        CRLF
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(CRLF.as_bytes());
    }

    // Header/body separator
    buf.extend_from_slice(CRLF.as_bytes());

    if let Body::Html(html) = &resp.body {
        buf.extend_from_slice(html.as_bytes());
    }

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
    file: Option<(File, u64)>,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        let buffer = serialize_head(&response);
        let file = match response.body {
            Body::File { file, len } => Some((file, len)),
            _ => None,
        };

        Self {
            buffer,
            written: 0,
            file,
        }
    }

    /// Writes the whole response, streaming any file body in bounded chunks.
    /// Returns the number of bytes put on the wire.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        let mut total = self.written as u64;

        if let Some((file, len)) = self.file.take() {
            let mut limited = file.take(len);
            let copied = tokio::io::copy(&mut limited, stream).await?;

            if copied < len {
                anyhow::bail!("file shrank while sending: {} of {} bytes", copied, len);
            }

            total += copied;
        }

        stream.flush().await?;
        Ok(total)
    }
}

use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::{BARE_HEADER_TERMINATOR, HEADER_TERMINATOR, READ_CHUNK_SIZE};

#[derive(Debug)]
pub enum ReadError {
    Io(std::io::Error),
    InvalidUtf8(std::str::Utf8Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(e) => write!(f, "failed to read request: {}", e),
            ReadError::InvalidUtf8(e) => write!(f, "request is not valid UTF-8: {}", e),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::InvalidUtf8(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

/// Drains one request from the stream and decodes it as UTF-8 text.
///
/// Reads in [`READ_CHUNK_SIZE`] chunks until the buffered bytes contain the
/// blank line ending the header block (`\r\n\r\n` or `\n\n`), or the peer
/// closes its side.
/// Returns `Ok(None)` when the peer closed without sending anything.
///
/// There is no timeout: a stalled sender keeps the task waiting.
pub async fn read_request_text<R>(stream: &mut R) -> Result<Option<String>, ReadError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = stream.read(&mut chunk).await?;

        if n == 0 {
            break;
        }

        // Only the tail can complete a terminator split across two reads
        let search_from = buffer.len().saturating_sub(HEADER_TERMINATOR.len() - 1);
        buffer.extend_from_slice(&chunk[..n]);

        if contains_terminator(&buffer[search_from..]) {
            break;
        }
    }

    if buffer.is_empty() {
        return Ok(None);
    }

    let text = std::str::from_utf8(&buffer).map_err(ReadError::InvalidUtf8)?;
    Ok(Some(text.to_string()))
}

fn contains_terminator(buf: &[u8]) -> bool {
    [HEADER_TERMINATOR, BARE_HEADER_TERMINATOR]
        .iter()
        .any(|t| buf.windows(t.len()).any(|w| w == *t))
}

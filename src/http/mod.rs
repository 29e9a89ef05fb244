//! Minimal HTTP-like protocol layer.
//!
//! Only what a read-only file server needs: one request per connection,
//! no request bodies, responses always close the connection.
//!
//! - **`reader`**: drains an accepted stream into the raw request text
//! - **`parser`**: turns the request text into a [`request::Request`]
//! - **`request`**: parsed request representation
//! - **`response`**: status codes, headers and body kinds
//! - **`writer`**: frames a response onto the stream
//! - **`connection`**: the per-connection state machine tying it together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Drain request text from the stream
//!        └──────┬──────┘
//!               │ Request text complete
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsed       │ ← Resolve against the server root
//!        └──────┬───────────┘
//!               │ Response ready (405 / 404 / listing / file)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send header block + body
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;

/// Line terminator used on the wire.
pub const CRLF: &str = "\r\n";

/// Blank line ending the header block.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Blank line ending a header block sent with bare LF line endings.
pub const BARE_HEADER_TERMINATOR: &[u8] = b"\n\n";

/// Size of each read while draining a request.
pub const READ_CHUNK_SIZE: usize = 1024;

/// Protocol version used when no request version is known.
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

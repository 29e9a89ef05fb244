//! dirserve - minimal single-host file server
//!
//! Answers one GET per connection with either an HTML listing of a
//! directory under the server root or the raw bytes of a file.

pub mod client;
pub mod config;
pub mod files;
pub mod http;
pub mod server;

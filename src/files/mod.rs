//! Filesystem side of the server
//!
//! Maps request paths onto the server root and turns what it finds there
//! into responses: a 404, an HTML listing of a directory, or a file stream.

pub mod listing;
pub mod resolver;

pub use listing::Entry;
pub use resolver::{Resolver, Target};

//! # Stream Input
//!
//! Helpers that deliver raw elementary stream data to an
//! [`ElementaryStreamReader`](crate::av::ElementaryStreamReader).

/// Chunked feeding of raw elementary stream files and readers
pub mod es;

pub use self::es::{feed_file, feed_reader};

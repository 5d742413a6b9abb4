use std::num::ParseIntError;
use thiserror::Error;

/// Errors surfaced by the reader, its sinks and the configuration layer.
#[derive(Error, Debug)]
pub enum H262Error {
    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A bitstream ended early or was otherwise unreadable.
    #[error("codec error: {0}")]
    Codec(String),

    /// A header did not have the expected layout.
    #[error("parser error: {0}")]
    Parser(String),

    /// Data was inconsistent, e.g. a header too short to decode.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A configuration value was rejected.
    #[error("config error: {0}")]
    Config(String),

    /// A configuration value was not a number.
    #[error("parse int error: {0}")]
    ParseInt(#[from] ParseIntError),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, H262Error>;

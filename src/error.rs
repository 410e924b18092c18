//! Error types.

use thiserror::Error;

/// Error parsing an invalid string representation of UUID.
#[derive(Error, Clone, PartialEq, Debug)]
pub enum ParseError {
    /// The 36-character form does not carry dashes at positions 8, 13, 18, and 23.
    #[error("invalid UUID format")]
    InvalidFormat,

    /// The input is neither 32 nor 36 characters long.
    #[error("invalid UUID length: {0}")]
    InvalidLength(usize),

    /// A character other than a hexadecimal digit appeared where one was expected.
    #[error("invalid hexadecimal encoding: {0}")]
    InvalidHexEncoding(#[from] hex::FromHexError),
}

/// Errors that can occur while generating, encoding, or binding UUIDv8 values.
#[derive(Error, Debug)]
pub enum Error {
    /// The node is not exactly six bytes long.
    #[error("node must be 6 bytes, got {0} bytes")]
    InvalidNodeLength(usize),

    /// The timestamp width is not 32, 48, or 60 bits.
    #[error("unsupported timestamp bit size: {0}")]
    UnsupportedTimestampWidth(u32),

    /// The input is not a UUID string.
    #[error("failed to parse UUID: {0}")]
    Parse(#[from] ParseError),

    /// The value parses or encodes but is not a well-formed UUIDv8.
    #[error("not a valid UUIDv8: {0}")]
    NotAValidIdentifier(String),

    /// The random number generator could not supply bytes.
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(#[source] rand::Error),

    /// A store value is neither text nor a blob.
    #[error("unsupported type for UUIDv8: {0}")]
    UnsupportedScanType(&'static str),
}

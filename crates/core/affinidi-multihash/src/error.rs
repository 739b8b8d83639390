//! Multihash errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MultihashError {
    #[error("Invalid digest length: {length} (must be between 1 and {max})")]
    InvalidLength { length: usize, max: usize },

    /// The reason string is part of the rendered message, callers match on
    /// `"Corrupted MultihasDigest: invalid length"`.
    #[error("Corrupted MultihasDigest: {0}")]
    CorruptedHeader(String),

    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Unsupported base: {0}")]
    UnsupportedBase(String),

    #[error("Decoding error ({base}): {reason}")]
    DecodeError { base: String, reason: String },

    #[error("Couldn't infer the base of the encoded text")]
    AmbiguousOrUnknown,

    #[error("IO error while hashing: {0}")]
    Io(#[from] std::io::Error),
}

impl MultihashError {
    pub(crate) fn invalid_length() -> Self {
        MultihashError::CorruptedHeader("invalid length".into())
    }
}

pub type Result<T> = std::result::Result<T, MultihashError>;

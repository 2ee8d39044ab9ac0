//! # Error Kinds

use thiserror::Error;

/// Result alias for this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by training, encoding, decoding, and model persistence.
///
/// Malformed UTF-8 encountered during decode is deliberately NOT an error;
/// it is replaced inline with U+FFFD.
#[derive(Error, Debug)]
pub enum Error {
    /// Target vocabulary size below the reserved byte range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A decode id absent from both the vocabulary and the special table.
    #[error("invalid token id: {0}")]
    InvalidToken(u64),

    /// Chunk split pattern failed to compile or scan.
    #[error("split pattern error: {0}")]
    Pattern(#[from] fancy_regex::Error),

    /// Filesystem failure while persisting or loading a model.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Model file failed to serialize or deserialize.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A loaded model violated a vocabulary or merge-table invariant.
    #[error("invalid model: {0}")]
    InvalidModel(String),
}

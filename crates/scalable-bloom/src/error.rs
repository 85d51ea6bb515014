//! Error types for the Bloom filter crate
//!
//! Every fallible operation returns [`FilterError`]. The variants fall into
//! four kinds, see [`ErrorKind`]. None of them is transient: retrying the same
//! call with the same inputs fails the same way.

use thiserror::Error;

/// Errors that can occur while building, merging or (de)serializing filters
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Incompatible filters size for merge: {left} != {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("Incompatible hash count for merge: {left} != {right}")]
    HashCountMismatch { left: usize, right: usize },

    #[error(
        "Digest too small to address the filter: {hash_count} hashes of {bytes_per_hash} bytes \
         (max digest {max_digest_bytes} bytes, max 8 bytes per hash)"
    )]
    Capacity {
        bytes_per_hash: usize,
        hash_count: usize,
        max_digest_bytes: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`FilterError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or incompatible construction / merge parameters
    Config,
    /// Hash partitioning exceeds the widest available digest
    Capacity,
    /// Malformed encoded input
    Serialization,
    /// Reading or writing a persisted snapshot failed
    Io,
}

impl FilterError {
    /// Which taxonomy bucket this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::InvalidParameters(_)
            | FilterError::SizeMismatch { .. }
            | FilterError::HashCountMismatch { .. } => ErrorKind::Config,
            FilterError::Capacity { .. } => ErrorKind::Capacity,
            FilterError::Serialization(_) => ErrorKind::Serialization,
            FilterError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for FilterError {
    fn from(err: bincode::Error) -> Self {
        FilterError::Serialization(err.to_string())
    }
}

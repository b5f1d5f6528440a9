//! Error types raised while turning raw dataset files into catalog records.

use std::path::PathBuf;

use thiserror::Error;

/// Failures detected while reading or validating a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset path does not exist.
    #[error("dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file could not be decoded as a JSON array of games.
    #[error("malformed dataset {}: {source}", .path.display())]
    Parse {
        /// File being decoded.
        path: PathBuf,
        /// Underlying decoder error.
        source: serde_json::Error,
    },
    /// A record was rejected during validation.
    #[error("invalid record #{index} in {}: {reason}", .path.display())]
    InvalidRecord {
        /// File holding the record.
        path: PathBuf,
        /// Zero-based position of the record within the file.
        index: usize,
        /// What was wrong with it.
        reason: Box<DatasetError>,
    },
    /// A record has an empty title.
    #[error("title must not be empty")]
    EmptyTitle,
    /// A genre label did not match any known genre.
    #[error("unknown genre '{0}'")]
    UnknownGenre(String),
    /// A release date matched none of the accepted formats.
    #[error("unparseable release date '{0}'")]
    InvalidDate(String),
}

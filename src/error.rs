//! Error types for placement-archiver
//!
//! This module provides the error taxonomy for the library:
//! - Per-document fetch errors, which are recovered locally and counted
//! - Archive serialization errors
//! - Delivery errors for both the browser and the native sink
//! - Configuration and I/O errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for placement-archiver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for placement-archiver
///
/// Only batch-level conditions surface through this type. A single document
/// that cannot be fetched is reported as a [`FetchError`] inside the pipeline
/// and never aborts the export.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "fetch.timeout")
        key: Option<String>,
    },

    /// The export was invoked with an empty descriptor list
    #[error("no documents to archive")]
    NoDocuments,

    /// The requested archive file name cannot be used
    #[error("invalid archive name {name:?}: {reason}")]
    InvalidArchiveName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Every document in the batch failed to fetch
    #[error("none of the {failed} document(s) could be fetched")]
    NothingFetched {
        /// Number of documents that failed
        failed: usize,
    },

    /// Building the ZIP archive failed
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Handing the archive to the platform failed
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client construction error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors fetching a single remote document
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source location is not a valid absolute URL
    #[error("invalid document URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending source location
        url: String,
        /// Parser message
        reason: String,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Status code received
        status: u16,
    },

    /// Connection, TLS, timeout or body read failure
    #[error("request to {url} failed: {reason}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying client error message
        reason: String,
    },

    /// The document exceeds the configured per-document size cap
    #[error("{url} is {size} bytes, limit is {limit} bytes")]
    TooLarge {
        /// Requested URL
        url: String,
        /// Reported or received size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },
}

/// Errors serializing the in-memory archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive builder holds no entries
    #[error("archive has no entries")]
    Empty,

    /// The ZIP writer rejected an entry or failed to finish
    #[error("failed to write entry {entry:?}: {reason}")]
    WriteFailed {
        /// Entry being written, if the failure is entry-specific
        entry: Option<String>,
        /// Writer error message
        reason: String,
    },
}

/// Errors handing the finished archive to the user
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Browser object URL creation or the synthetic download failed
    #[error("browser download failed: {0}")]
    Download(String),

    /// Writing the archive to a candidate location failed
    #[error("failed to write {path}: {reason}")]
    WriteFailed {
        /// Target path
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },

    /// No share mechanism is available on this host
    #[error("no share mechanism available")]
    ShareUnavailable,

    /// The share mechanism was available but did not complete
    #[error("sharing {path} failed: {reason}")]
    ShareFailed {
        /// File that was being shared
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },

    /// Every candidate directory was tried and none produced a shared file
    #[error("all {attempts} delivery attempt(s) failed")]
    AllAttemptsFailed {
        /// Number of candidate directories tried
        attempts: usize,
    },

    /// The native sink was configured without candidate directories
    #[error("no candidate directories configured")]
    NoCandidateDirectories,
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

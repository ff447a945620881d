//! Core types and events

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One remote document to include in an export
///
/// Deserializes from the record shape produced by the admin screens
/// (`url`, `studentName`, `rollNo`, `documentType`) as well as from the
/// field names below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    /// Location of the document (absolute HTTP(S) URL)
    #[serde(alias = "url")]
    pub source_location: String,
    /// Display name of the owning student
    #[serde(alias = "studentName")]
    pub owner_display_name: String,
    /// Roll number or other identifier of the owning student
    #[serde(alias = "rollNo")]
    pub owner_identifier: String,
    /// Document kind, e.g. "offer_letter" or an internship assignment type
    #[serde(default, alias = "documentType", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl DocumentDescriptor {
    /// Create a descriptor without a category
    pub fn new(
        source_location: impl Into<String>,
        owner_display_name: impl Into<String>,
        owner_identifier: impl Into<String>,
    ) -> Self {
        Self {
            source_location: source_location.into(),
            owner_display_name: owner_display_name.into(),
            owner_identifier: owner_identifier.into(),
            category: None,
        }
    }

    /// Attach a document category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Result of fetching a single document
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The document body
    Fetched(Vec<u8>),
    /// Why the document could not be retrieved
    Failed(String),
}

impl<E: std::fmt::Display> From<std::result::Result<Vec<u8>, E>> for FetchOutcome {
    fn from(result: std::result::Result<Vec<u8>, E>) -> Self {
        match result {
            Ok(bytes) => FetchOutcome::Fetched(bytes),
            Err(e) => FetchOutcome::Failed(e.to_string()),
        }
    }
}

/// A named file inside the archive
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// File name inside the archive, derived from descriptor fields
    pub entry_name: String,
    /// File content
    pub content: Vec<u8>,
}

/// Serialized archive plus the per-document tally
///
/// Exists only for the duration of one export.
#[derive(Clone, Debug)]
pub struct ArchiveResult {
    /// ZIP bytes
    pub content: Vec<u8>,
    /// Entry names in archive order (after collisions collapsed)
    pub entry_names: Vec<String>,
    /// Documents fetched successfully
    pub succeeded: usize,
    /// Documents that could not be fetched
    pub failed: usize,
}

/// Delivery platform the host application is running on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Browser: direct download through an object URL
    Web,
    /// Mobile/native: save to storage, then open the share sheet
    Native,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Web => f.write_str("web"),
            Platform::Native => f.write_str("native"),
        }
    }
}

/// How the archive reached the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryReceipt {
    /// Browser download was triggered
    Downloaded {
        /// File name offered to the browser
        file_name: String,
    },
    /// Archive was written to storage and handed to the share mechanism
    Shared {
        /// Where the archive was written
        path: PathBuf,
        /// Number of candidate directories tried, including the successful one
        attempts: usize,
    },
}

/// Summary of a successful export
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Archive file name presented to the user
    pub archive_name: String,
    /// Documents included in the archive
    pub succeeded: usize,
    /// Documents that could not be fetched
    pub failed: usize,
    /// Serialized archive size in bytes
    pub archive_size: usize,
    /// How the archive was delivered
    pub receipt: DeliveryReceipt,
}

impl ExportReport {
    /// Whether some documents are missing from the archive
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }
}

/// Event emitted while an export runs
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExportEvent {
    /// A document was fetched and added to the archive
    DocumentFetched {
        /// Archive name of the export
        archive_name: String,
        /// Entry name the document was stored under
        entry_name: String,
        /// Document size in bytes
        size: usize,
    },

    /// A document could not be fetched and was skipped
    DocumentFailed {
        /// Archive name of the export
        archive_name: String,
        /// Location that failed
        source_location: String,
        /// Failure description
        reason: String,
    },

    /// The archive was serialized
    ArchiveBuilt {
        /// Archive name of the export
        archive_name: String,
        /// Number of entries in the archive
        entries: usize,
        /// Archive size in bytes
        size: usize,
    },

    /// The archive reached the user
    Delivered {
        /// Archive name of the export
        archive_name: String,
        /// Delivery details
        receipt: DeliveryReceipt,
    },

    /// The export ended without delivering an archive
    ExportFailed {
        /// Archive name of the export
        archive_name: String,
        /// Failure description
        error: String,
    },
}

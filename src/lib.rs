//! # placement-archiver
//!
//! Bulk document export for campus placement tracking: fetch a list of remote
//! documents (offer letters, internship submissions), bundle them into a
//! single ZIP archive, and hand the archive to the user through the platform's
//! delivery mechanism.
//!
//! ## Design Philosophy
//!
//! - **Partial success is success** - a document that cannot be fetched is
//!   logged, counted and skipped; the export only fails when nothing could be
//!   fetched or the archive could not be delivered
//! - **Sequential** - documents are fetched one at a time to bound load on the
//!   file host
//! - **Traceable names** - entries are named `{roll no}_{name}[_{type}].{ext}`,
//!   never after the remote file
//! - **Platform-agnostic core** - delivery goes through one
//!   [`DeliverySink`](delivery::DeliverySink) chosen by the host at runtime
//!
//! ## Quick Start
//!
//! ```no_run
//! use placement_archiver::delivery::{CommandShareSheet, LocalFileStore, PlatformServices};
//! use placement_archiver::naming::offer_letters_archive_name;
//! use placement_archiver::{ArchiverConfig, BulkArchiver, DocumentDescriptor};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ArchiverConfig::default();
//!     let services = PlatformServices::Native {
//!         store: Arc::new(LocalFileStore),
//!         share: Arc::new(CommandShareSheet::from_path(
//!             "xdg-open",
//!             config.delivery.share_timeout,
//!         )),
//!     };
//!     let archiver = BulkArchiver::new(config, services)?;
//!
//!     let documents = vec![
//!         DocumentDescriptor::new(
//!             "https://files.example.com/offers/8f2c.pdf",
//!             "John Doe",
//!             "TYIT001",
//!         )
//!         .with_category("offer_letter"),
//!     ];
//!
//!     let name = offer_letters_archive_name("Acme Corp", chrono::Utc::now().date_naive());
//!     let report = archiver.export(&documents, &name).await?;
//!     println!("{} document(s) exported, {} missing", report.succeeded, report.failed);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// ZIP assembly
pub mod archive;
/// The export pipeline
pub mod archiver;
/// Configuration types
pub mod config;
/// Platform delivery sinks
pub mod delivery;
/// Error types
pub mod error;
/// Document fetching
pub mod fetch;
/// Entry and archive naming
pub mod naming;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use archiver::BulkArchiver;
pub use config::{ArchiverConfig, Compression};
pub use delivery::{DeliverySink, PlatformServices};
pub use error::{ArchiveError, DeliveryError, Error, FetchError, Result};
pub use fetch::{DocumentFetcher, HttpFetcher};
pub use types::{
    ArchiveEntry, ArchiveResult, DeliveryReceipt, DocumentDescriptor, ExportEvent, ExportReport,
    FetchOutcome, Platform,
};

/// Export documents once with the default configuration
///
/// Builds a [`BulkArchiver`] for `services`, fetches every document over HTTP,
/// and delivers `archive_name`. Returns `false` when the archiver cannot be
/// built, the list is empty, nothing could be fetched, or delivery fails.
///
/// # Example
///
/// ```no_run
/// use placement_archiver::delivery::{LocalFileStore, NoShareSheet};
/// use placement_archiver::{DocumentDescriptor, PlatformServices, archive_and_deliver};
/// use std::sync::Arc;
///
/// # async fn run() {
/// let services = PlatformServices::Native {
///     store: Arc::new(LocalFileStore),
///     share: Arc::new(NoShareSheet),
/// };
/// let documents = [DocumentDescriptor::new("https://files.example.com/a.pdf", "Asha Rao", "TYIT014")];
/// let delivered = archive_and_deliver(&documents, "TYIT_resume_2026-10-19.zip", services).await;
/// # }
/// ```
pub async fn archive_and_deliver(
    descriptors: &[DocumentDescriptor],
    archive_name: &str,
    services: PlatformServices,
) -> bool {
    if descriptors.is_empty() {
        return false;
    }

    match BulkArchiver::new(ArchiverConfig::default(), services) {
        Ok(archiver) => archiver.archive_and_deliver(descriptors, archive_name).await,
        Err(e) => {
            tracing::error!(error = %e, "failed to set up document archiver");
            false
        }
    }
}

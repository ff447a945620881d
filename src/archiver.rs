//! The bulk export pipeline
//!
//! An export runs as one sequential async pipeline:
//! 1. Fetch - one document at a time, failures are counted and skipped
//! 2. Name - derive each entry name from the descriptor
//! 3. Build - insert into a per-call [`ArchiveBuilder`]
//! 4. Serialize - produce the ZIP bytes (only if something was fetched)
//! 5. Deliver - hand the bytes to the platform [`DeliverySink`]

use crate::archive::ArchiveBuilder;
use crate::config::ArchiverConfig;
use crate::delivery::{DeliverySink, PlatformServices};
use crate::error::{Error, Result};
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::naming::{entry_name, validate_archive_name};
use crate::types::{
    ArchiveEntry, ArchiveResult, DocumentDescriptor, ExportEvent, ExportReport, FetchOutcome,
    Platform,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Capacity of the export event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Fetches documents, bundles them into one ZIP and delivers it
///
/// Each call to [`export`](Self::export) or
/// [`archive_and_deliver`](Self::archive_and_deliver) owns its own archive
/// builder, so concurrent exports through one `BulkArchiver` are independent.
pub struct BulkArchiver {
    config: Arc<ArchiverConfig>,
    fetcher: Arc<dyn DocumentFetcher>,
    sink: Arc<dyn DeliverySink>,
    event_tx: broadcast::Sender<ExportEvent>,
}

impl BulkArchiver {
    /// Create an archiver fetching over HTTP and delivering through `services`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ArchiverConfig, services: PlatformServices) -> Result<Self> {
        config.validate()?;
        let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
        let sink = services.into_sink(&config.delivery);
        Self::with_components(config, fetcher, sink)
    }

    /// Create an archiver from explicit fetcher and sink implementations
    pub fn with_components(
        config: ArchiverConfig,
        fetcher: Arc<dyn DocumentFetcher>,
        sink: Arc<dyn DeliverySink>,
    ) -> Result<Self> {
        config.validate()?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            sink,
            event_tx,
        })
    }

    /// Subscribe to export progress events
    pub fn subscribe(&self) -> broadcast::Receiver<ExportEvent> {
        self.event_tx.subscribe()
    }

    /// Platform the archive is delivered to
    pub fn platform(&self) -> Platform {
        self.sink.platform()
    }

    /// Active configuration
    pub fn config(&self) -> &ArchiverConfig {
        &self.config
    }

    /// Export `descriptors` as `archive_name`, reporting only success or failure
    ///
    /// Returns `true` when an archive with at least one document was delivered,
    /// including when some documents were missing. Every failure is logged.
    pub async fn archive_and_deliver(
        &self,
        descriptors: &[DocumentDescriptor],
        archive_name: &str,
    ) -> bool {
        match self.export(descriptors, archive_name).await {
            Ok(report) => {
                if report.is_partial() {
                    warn!(
                        archive = %archive_name,
                        succeeded = report.succeeded,
                        failed = report.failed,
                        "archive delivered with some documents missing"
                    );
                }
                true
            }
            Err(e) => {
                error!(archive = %archive_name, error = %e, "document export failed");
                false
            }
        }
    }

    /// Export `descriptors` as `archive_name`
    ///
    /// # Errors
    ///
    /// - [`Error::NoDocuments`] for an empty list (no network access happens)
    /// - [`Error::InvalidArchiveName`] for a name that is not a plain file name
    /// - [`Error::NothingFetched`] when every document failed
    /// - [`Error::Archive`] when serialization fails
    /// - [`Error::Delivery`] when the platform sink fails
    pub async fn export(
        &self,
        descriptors: &[DocumentDescriptor],
        archive_name: &str,
    ) -> Result<ExportReport> {
        if descriptors.is_empty() {
            return Err(Error::NoDocuments);
        }
        validate_archive_name(archive_name)?;

        let result = self.run_export(descriptors, archive_name).await;

        if let Err(e) = &result {
            self.emit(ExportEvent::ExportFailed {
                archive_name: archive_name.to_string(),
                error: e.to_string(),
            });
        }

        result
    }

    async fn run_export(
        &self,
        descriptors: &[DocumentDescriptor],
        archive_name: &str,
    ) -> Result<ExportReport> {
        let archive = self.build_archive(descriptors, archive_name).await?;
        let archive_size = archive.content.len();

        let receipt = self.sink.deliver(&archive.content, archive_name).await?;

        info!(
            archive = %archive_name,
            platform = %self.sink.platform(),
            succeeded = archive.succeeded,
            failed = archive.failed,
            size = archive_size,
            "archive delivered"
        );

        self.emit(ExportEvent::Delivered {
            archive_name: archive_name.to_string(),
            receipt: receipt.clone(),
        });

        Ok(ExportReport {
            archive_name: archive_name.to_string(),
            succeeded: archive.succeeded,
            failed: archive.failed,
            archive_size,
            receipt,
        })
    }

    /// Fetch every document in order and serialize the successful ones
    ///
    /// Documents are fetched strictly one after another. A failed document is
    /// logged and counted but never stops the batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingFetched`] when no document could be fetched, and
    /// [`Error::Archive`] when the ZIP writer fails.
    pub async fn build_archive(
        &self,
        descriptors: &[DocumentDescriptor],
        archive_name: &str,
    ) -> Result<ArchiveResult> {
        let mut builder = ArchiveBuilder::new(self.config.archive.compression);
        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for descriptor in descriptors {
            match self.fetch_outcome(descriptor).await {
                FetchOutcome::Fetched(content) => {
                    let name = entry_name(descriptor, &self.config.archive.default_extension);
                    let size = content.len();
                    debug!(entry = %name, size, "adding document to archive");

                    builder.insert(ArchiveEntry {
                        entry_name: name.clone(),
                        content,
                    });
                    succeeded += 1;

                    self.emit(ExportEvent::DocumentFetched {
                        archive_name: archive_name.to_string(),
                        entry_name: name,
                        size,
                    });
                }
                FetchOutcome::Failed(reason) => {
                    warn!(
                        owner = %descriptor.owner_display_name,
                        url = %descriptor.source_location,
                        error = %reason,
                        "failed to fetch document, skipping"
                    );
                    failed += 1;

                    self.emit(ExportEvent::DocumentFailed {
                        archive_name: archive_name.to_string(),
                        source_location: descriptor.source_location.clone(),
                        reason,
                    });
                }
            }
        }

        if succeeded == 0 {
            error!(archive = %archive_name, failed, "no documents could be fetched");
            return Err(Error::NothingFetched { failed });
        }

        let entry_names: Vec<String> = builder.entry_names().map(str::to_string).collect();
        let content = builder.finish()?;

        info!(
            archive = %archive_name,
            entries = entry_names.len(),
            succeeded,
            failed,
            size = content.len(),
            "archive built"
        );

        self.emit(ExportEvent::ArchiveBuilt {
            archive_name: archive_name.to_string(),
            entries: entry_names.len(),
            size: content.len(),
        });

        Ok(ArchiveResult {
            content,
            entry_names,
            succeeded,
            failed,
        })
    }

    async fn fetch_outcome(&self, descriptor: &DocumentDescriptor) -> FetchOutcome {
        self.fetcher
            .fetch(&descriptor.source_location)
            .await
            .into()
    }

    fn emit(&self, event: ExportEvent) {
        // No subscribers is fine
        self.event_tx.send(event).ok();
    }
}

//! Archive delivery
//!
//! Once an archive is serialized it is handed to exactly one [`DeliverySink`].
//! Two implementations are provided, one per platform:
//!
//! - [`BrowserDownloadSink`]: exposes the archive through a transient object
//!   URL and triggers a browser download
//! - [`NativeShareSink`]: saves the archive to the first writable candidate
//!   directory and opens the platform share mechanism
//!
//! The host application picks the platform at runtime by constructing the
//! matching [`PlatformServices`] variant; the archiving pipeline itself never
//! branches on platform.
//!
//! ## Usage
//!
//! ```no_run
//! use placement_archiver::delivery::{CommandShareSheet, LocalFileStore, PlatformServices};
//! use placement_archiver::config::DeliveryConfig;
//! use std::sync::Arc;
//!
//! let config = DeliveryConfig::default();
//! let services = PlatformServices::Native {
//!     store: Arc::new(LocalFileStore),
//!     share: Arc::new(CommandShareSheet::from_path("xdg-open", config.share_timeout)),
//! };
//! let sink = services.into_sink(&config);
//! ```

use crate::config::DeliveryConfig;
use crate::error::Result;
use crate::types::{DeliveryReceipt, Platform};
use async_trait::async_trait;
use std::sync::Arc;

mod browser;
mod native;

pub use browser::{BrowserDownloadSink, BrowserHost};
pub use native::{
    CommandShareSheet, FileStore, LocalFileStore, NativeShareSink, NoShareSheet, ShareOptions,
    ShareSheet,
};

/// Hands a finished archive to the user
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Deliver `archive` under the file name `archive_name`
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`](crate::error::DeliveryError) wrapped in
    /// [`Error::Delivery`](crate::Error::Delivery) when the archive could not be
    /// handed over. A failed delivery means the export failed.
    async fn deliver(&self, archive: &[u8], archive_name: &str) -> Result<DeliveryReceipt>;

    /// Platform this sink delivers to
    fn platform(&self) -> Platform;
}

/// Platform capabilities supplied by the host application
#[derive(Clone)]
pub enum PlatformServices {
    /// Browser host: object URLs and synthetic downloads
    Web {
        /// Browser bindings
        host: Arc<dyn BrowserHost>,
    },
    /// Native host: file storage and a share mechanism
    Native {
        /// File writer for candidate directories
        store: Arc<dyn FileStore>,
        /// Share sheet
        share: Arc<dyn ShareSheet>,
    },
}

impl PlatformServices {
    /// Platform these services belong to
    pub fn platform(&self) -> Platform {
        match self {
            PlatformServices::Web { .. } => Platform::Web,
            PlatformServices::Native { .. } => Platform::Native,
        }
    }

    /// Build the delivery sink matching this platform
    pub fn into_sink(self, config: &DeliveryConfig) -> Arc<dyn DeliverySink> {
        match self {
            PlatformServices::Web { host } => {
                Arc::new(BrowserDownloadSink::new(host, config.mime_type.clone()))
            }
            PlatformServices::Native { store, share } => Arc::new(NativeShareSink::new(
                store,
                share,
                config.candidate_dirs.clone(),
                config.mime_type.clone(),
            )),
        }
    }
}

impl std::fmt::Debug for PlatformServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformServices")
            .field("platform", &self.platform())
            .finish_non_exhaustive()
    }
}

//! Browser download delivery

use super::DeliverySink;
use crate::error::{DeliveryError, Error, Result};
use crate::types::{DeliveryReceipt, Platform};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Browser bindings provided by a web host
///
/// Implementations wrap the host's object-URL and anchor-click APIs.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// Expose `data` as a transient object URL with the given MIME type
    async fn create_object_url(&self, data: &[u8], mime_type: &str) -> Result<String>;

    /// Start a download of `object_url`, suggesting `file_name`
    async fn trigger_download(&self, object_url: &str, file_name: &str) -> Result<()>;

    /// Release an object URL created by [`create_object_url`](Self::create_object_url)
    async fn revoke_object_url(&self, object_url: &str);
}

/// Delivers an archive as a direct browser download
///
/// The object URL is revoked right after the download is triggered, also when
/// triggering failed. A failed trigger is not retried.
pub struct BrowserDownloadSink {
    host: Arc<dyn BrowserHost>,
    mime_type: String,
}

impl BrowserDownloadSink {
    /// Create a sink over the given browser host
    pub fn new(host: Arc<dyn BrowserHost>, mime_type: impl Into<String>) -> Self {
        Self {
            host,
            mime_type: mime_type.into(),
        }
    }
}

#[async_trait]
impl DeliverySink for BrowserDownloadSink {
    async fn deliver(&self, archive: &[u8], archive_name: &str) -> Result<DeliveryReceipt> {
        let object_url = self
            .host
            .create_object_url(archive, &self.mime_type)
            .await
            .map_err(|e| DeliveryError::Download(format!("could not create object URL: {e}")))?;

        debug!(%object_url, archive = %archive_name, "triggering browser download");
        let triggered = self.host.trigger_download(&object_url, archive_name).await;
        self.host.revoke_object_url(&object_url).await;

        match triggered {
            Ok(()) => {
                info!(archive = %archive_name, size = archive.len(), "browser download triggered");
                Ok(DeliveryReceipt::Downloaded {
                    file_name: archive_name.to_string(),
                })
            }
            Err(e) => {
                warn!(archive = %archive_name, error = %e, "browser download failed");
                Err(Error::Delivery(DeliveryError::Download(e.to_string())))
            }
        }
    }

    fn platform(&self) -> Platform {
        Platform::Web
    }
}

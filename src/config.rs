//! Configuration types for placement-archiver

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, path::PathBuf, time::Duration};

/// HTTP fetching behavior
///
/// Groups settings for how documents are retrieved from the remote file host.
/// Used as a nested sub-config within [`ArchiverConfig`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout, applied by the HTTP client (default: 60 seconds)
    #[serde(default = "default_fetch_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Largest accepted document in bytes (None = unlimited, default: 50 MiB)
    ///
    /// Every fetched document stays in memory until the archive is serialized,
    /// so an oversized document is treated as a failed fetch.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_fetch_timeout(),
            user_agent: default_user_agent(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

/// ZIP compression method for archive entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    /// Store entries uncompressed
    Stored,
    /// Deflate entries (default)
    #[default]
    Deflated,
}

impl From<Compression> for zip::CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Stored => zip::CompressionMethod::Stored,
            Compression::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

/// Archive building behavior
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Extension used when none can be parsed from the document URL (default: "pdf")
    #[serde(default = "default_extension")]
    pub default_extension: String,

    /// Compression method for every entry
    #[serde(default)]
    pub compression: Compression,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            default_extension: default_extension(),
            compression: Compression::default(),
        }
    }
}

/// Native delivery behavior (candidate directories, sharing)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Directories tried in order when saving the archive before sharing
    ///
    /// Defaults to the platform cache directory followed by the documents
    /// directory. Falls back to the system temp directory when neither exists.
    #[serde(default = "default_candidate_dirs")]
    pub candidate_dirs: Vec<PathBuf>,

    /// MIME type handed to the share mechanism (default: "application/zip")
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// How long an opener command may run before sharing counts as failed (default: 120 seconds)
    #[serde(default = "default_share_timeout", with = "duration_serde")]
    pub share_timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            candidate_dirs: default_candidate_dirs(),
            mime_type: default_mime_type(),
            share_timeout: default_share_timeout(),
        }
    }
}

/// Main configuration for [`BulkArchiver`](crate::BulkArchiver)
///
/// Fields are organized into sub-configs:
/// - [`fetch`](FetchConfig) — HTTP timeout, user agent, size cap
/// - [`archive`](ArchiveConfig) — default extension, compression
/// - [`delivery`](DeliveryConfig) — candidate directories, MIME type, share timeout
///
/// Every field has a default, so `{}` is a valid JSON configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArchiverConfig {
    /// HTTP fetching settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Archive building settings
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Delivery settings
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl ArchiverConfig {
    /// Load a configuration from a JSON file and validate it
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let config: ArchiverConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout.is_zero() {
            return Err(Error::config(
                "fetch.timeout",
                "timeout must be greater than zero",
            ));
        }

        if self.fetch.max_document_bytes == Some(0) {
            return Err(Error::config(
                "fetch.max_document_bytes",
                "limit must be greater than zero, use null for unlimited",
            ));
        }

        let ext = &self.archive.default_extension;
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::config(
                "archive.default_extension",
                format!("extension {ext:?} must be non-empty and alphanumeric"),
            ));
        }

        if self.delivery.mime_type.trim().is_empty() {
            return Err(Error::config(
                "delivery.mime_type",
                "MIME type must not be empty",
            ));
        }

        if self.delivery.share_timeout.is_zero() {
            return Err(Error::config(
                "delivery.share_timeout",
                "share timeout must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_user_agent() -> String {
    format!("placement-archiver/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_document_bytes() -> Option<u64> {
    Some(50 * 1024 * 1024)
}

fn default_extension() -> String {
    "pdf".to_string()
}

fn default_candidate_dirs() -> Vec<PathBuf> {
    let dirs: Vec<PathBuf> = [dirs::cache_dir(), dirs::document_dir()]
        .into_iter()
        .flatten()
        .collect();

    if dirs.is_empty() {
        vec![std::env::temp_dir()]
    } else {
        dirs
    }
}

fn default_mime_type() -> String {
    "application/zip".to_string()
}

fn default_share_timeout() -> Duration {
    Duration::from_secs(120)
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

//! Save-and-share delivery for native hosts

use super::DeliverySink;
use crate::error::{DeliveryError, Error, Result};
use crate::types::{DeliveryReceipt, Platform};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Options passed to the share mechanism
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareOptions {
    /// MIME type of the shared file
    pub mime_type: String,
    /// Title shown on the share dialog
    pub dialog_title: String,
}

/// Writes base64-encoded content to a storage location
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Decode `base64_data` and write it to `path`, replacing any existing file
    async fn write_base64(&self, path: &Path, base64_data: &str) -> Result<()>;
}

/// Platform share sheet
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether sharing can be offered on this host right now
    async fn is_available(&self) -> bool;

    /// Present `path` to the user for saving or sending elsewhere
    async fn share(&self, path: &Path, options: &ShareOptions) -> Result<()>;
}

/// [`FileStore`] backed by the local filesystem
///
/// Parent directories are not created; a missing candidate directory is a
/// failed write so the next candidate gets tried.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFileStore;

#[async_trait]
impl FileStore for LocalFileStore {
    async fn write_base64(&self, path: &Path, base64_data: &str) -> Result<()> {
        let bytes = STANDARD
            .decode(base64_data)
            .map_err(|e| DeliveryError::WriteFailed {
                path: path.to_path_buf(),
                reason: format!("invalid base64 payload: {e}"),
            })?;

        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| DeliveryError::WriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

/// [`ShareSheet`] that is never available
///
/// For headless hosts: every native delivery attempt fails after writing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShareSheet;

#[async_trait]
impl ShareSheet for NoShareSheet {
    async fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, _path: &Path, _options: &ShareOptions) -> Result<()> {
        Err(Error::Delivery(DeliveryError::ShareUnavailable))
    }
}

/// [`ShareSheet`] that hands the file to an opener command (e.g. `xdg-open`, `open`)
///
/// The command is run with the file path as its only argument. The MIME type
/// and dialog title are exported as `PLACEMENT_ARCHIVER_MIME_TYPE` and
/// `PLACEMENT_ARCHIVER_DIALOG_TITLE`.
#[derive(Clone, Debug)]
pub struct CommandShareSheet {
    program: Option<PathBuf>,
    timeout: Duration,
}

impl CommandShareSheet {
    /// Use an explicit opener executable
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: Some(program.into()),
            timeout,
        }
    }

    /// Look the opener up on `PATH`; unavailable when it cannot be found
    pub fn from_path(name: &str, timeout: Duration) -> Self {
        let program = match which::which(name) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!(opener = name, error = %e, "share opener not found on PATH");
                None
            }
        };
        Self { program, timeout }
    }

    /// Resolved opener executable, if any
    pub fn program(&self) -> Option<&Path> {
        self.program.as_deref()
    }
}

#[async_trait]
impl ShareSheet for CommandShareSheet {
    async fn is_available(&self) -> bool {
        self.program.as_deref().is_some_and(Path::exists)
    }

    async fn share(&self, path: &Path, options: &ShareOptions) -> Result<()> {
        let program = self
            .program
            .as_deref()
            .ok_or(DeliveryError::ShareUnavailable)?;

        let result = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new(program)
                .arg(path)
                .kill_on_drop(true)
                .env("PLACEMENT_ARCHIVER_MIME_TYPE", &options.mime_type)
                .env("PLACEMENT_ARCHIVER_DIALOG_TITLE", &options.dialog_title)
                .output(),
        )
        .await;

        let failure = match result {
            Ok(Ok(output)) if output.status.success() => return Ok(()),
            Ok(Ok(output)) => format!("opener exited with {}", output.status),
            Ok(Err(e)) => format!("failed to run opener: {e}"),
            Err(_) => format!("opener timed out after {:?}", self.timeout),
        };

        Err(Error::Delivery(DeliveryError::ShareFailed {
            path: path.to_path_buf(),
            reason: failure,
        }))
    }
}

/// Saves the archive to the first working candidate directory, then shares it
///
/// Candidate directories are tried in order. An attempt succeeds only when the
/// write succeeds, a share mechanism is available, and sharing completes; any
/// other outcome moves on to the next directory.
pub struct NativeShareSink {
    store: Arc<dyn FileStore>,
    share: Arc<dyn ShareSheet>,
    candidate_dirs: Vec<PathBuf>,
    mime_type: String,
}

impl NativeShareSink {
    /// Create a sink trying `candidate_dirs` in order
    pub fn new(
        store: Arc<dyn FileStore>,
        share: Arc<dyn ShareSheet>,
        candidate_dirs: Vec<PathBuf>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            store,
            share,
            candidate_dirs,
            mime_type: mime_type.into(),
        }
    }

    /// Write to one candidate directory and share the result
    async fn attempt(
        &self,
        directory: &Path,
        archive_name: &str,
        encoded: &str,
        options: &ShareOptions,
    ) -> Result<PathBuf> {
        let target = directory.join(archive_name);
        self.store.write_base64(&target, encoded).await?;

        if !self.share.is_available().await {
            return Err(Error::Delivery(DeliveryError::ShareUnavailable));
        }

        self.share.share(&target, options).await?;
        Ok(target)
    }
}

#[async_trait]
impl DeliverySink for NativeShareSink {
    async fn deliver(&self, archive: &[u8], archive_name: &str) -> Result<DeliveryReceipt> {
        if self.candidate_dirs.is_empty() {
            return Err(Error::Delivery(DeliveryError::NoCandidateDirectories));
        }

        let encoded = STANDARD.encode(archive);
        let options = ShareOptions {
            mime_type: self.mime_type.clone(),
            dialog_title: format!("Save {archive_name}"),
        };

        for (index, directory) in self.candidate_dirs.iter().enumerate() {
            match self
                .attempt(directory, archive_name, &encoded, &options)
                .await
            {
                Ok(path) => {
                    info!(path = %path.display(), attempts = index + 1, "archive saved and shared");
                    return Ok(DeliveryReceipt::Shared {
                        path,
                        attempts: index + 1,
                    });
                }
                Err(e) => {
                    warn!(
                        directory = %directory.display(),
                        error = %e,
                        "delivery attempt failed, trying next directory"
                    );
                }
            }
        }

        Err(Error::Delivery(DeliveryError::AllAttemptsFailed {
            attempts: self.candidate_dirs.len(),
        }))
    }

    fn platform(&self) -> Platform {
        Platform::Native
    }
}

//! Test doubles for the browser and native host bindings

use async_trait::async_trait;
use placement_archiver::delivery::{
    BrowserHost, FileStore, LocalFileStore, ShareOptions, ShareSheet,
};
use placement_archiver::{DeliveryError, Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Browser host that keeps every downloaded blob
#[derive(Default)]
pub struct RecordingBrowser {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    /// `(file name, blob bytes)` for each triggered download
    pub downloads: Mutex<Vec<(String, Vec<u8>)>>,
    /// Object URLs that were revoked
    pub revoked: Mutex<Vec<String>>,
}

impl RecordingBrowser {
    /// Number of object URLs still alive
    pub fn live_object_urls(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl BrowserHost for RecordingBrowser {
    async fn create_object_url(&self, data: &[u8], _mime_type: &str) -> Result<String> {
        let mut blobs = self.blobs.lock().unwrap();
        let url = format!("blob:test/{}", blobs.len() + self.revoked.lock().unwrap().len());
        blobs.insert(url.clone(), data.to_vec());
        Ok(url)
    }

    async fn trigger_download(&self, object_url: &str, file_name: &str) -> Result<()> {
        let data = self
            .blobs
            .lock()
            .unwrap()
            .get(object_url)
            .cloned()
            .ok_or_else(|| Error::Delivery(DeliveryError::Download("unknown blob".into())))?;
        self.downloads
            .lock()
            .unwrap()
            .push((file_name.to_string(), data));
        Ok(())
    }

    async fn revoke_object_url(&self, object_url: &str) {
        self.blobs.lock().unwrap().remove(object_url);
        self.revoked.lock().unwrap().push(object_url.to_string());
    }
}

/// File store that fails for chosen directories and writes to disk otherwise
#[derive(Default)]
pub struct FlakyFileStore {
    failing_dirs: Vec<PathBuf>,
    /// Every path a write was attempted for, in order
    pub attempts: Mutex<Vec<PathBuf>>,
}

impl FlakyFileStore {
    /// Fail every write below any of `dirs`
    pub fn failing_in(dirs: &[&Path]) -> Self {
        Self {
            failing_dirs: dirs.iter().map(|d| d.to_path_buf()).collect(),
            attempts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FileStore for FlakyFileStore {
    async fn write_base64(&self, path: &Path, base64_data: &str) -> Result<()> {
        self.attempts.lock().unwrap().push(path.to_path_buf());

        if self.failing_dirs.iter().any(|dir| path.starts_with(dir)) {
            return Err(Error::Delivery(DeliveryError::WriteFailed {
                path: path.to_path_buf(),
                reason: "simulated write failure".to_string(),
            }));
        }

        LocalFileStore.write_base64(path, base64_data).await
    }
}

/// Share sheet with a fixed availability that records shared files
pub struct RecordingShareSheet {
    available: bool,
    /// Every shared `(path, options)`
    pub shared: Mutex<Vec<(PathBuf, ShareOptions)>>,
}

impl RecordingShareSheet {
    /// A share sheet reporting the given availability
    pub fn new(available: bool) -> Self {
        Self {
            available,
            shared: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ShareSheet for RecordingShareSheet {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn share(&self, path: &Path, options: &ShareOptions) -> Result<()> {
        self.shared
            .lock()
            .unwrap()
            .push((path.to_path_buf(), options.clone()));
        Ok(())
    }
}

//! Remote document retrieval
//!
//! The [`DocumentFetcher`] trait is the seam between the archiving pipeline and
//! the network. [`HttpFetcher`] is the production implementation: one plain
//! HTTP GET per document, any non-2xx status counts as a failure.

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Retrieves a document body from its source location
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the full body of the document at `url`
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] when the URL is invalid, the request fails,
    /// the server answers with a non-success status, or the body exceeds the
    /// configured size limit. Callers treat these as per-document failures.
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

/// Fetches documents over HTTP(S) with `reqwest`
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_document_bytes: Option<u64>,
}

impl HttpFetcher {
    /// Build a fetcher from the fetch configuration
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            max_document_bytes: config.max_document_bytes,
        })
    }

    /// Build a fetcher around an existing client
    pub fn with_client(client: reqwest::Client, max_document_bytes: Option<u64>) -> Self {
        Self {
            client,
            max_document_bytes,
        }
    }

    fn check_size(&self, url: &str, size: u64) -> std::result::Result<(), FetchError> {
        match self.max_document_bytes {
            Some(limit) if size > limit => Err(FetchError::TooLarge {
                url: url.to_string(),
                size,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(%url, "fetching document");

        let mut response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Reject early when the server announces an oversized body
        if let Some(length) = response.content_length() {
            self.check_size(url, length)?;
        }

        // Chunked bodies carry no length, so the cap is enforced while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })? {
            self.check_size(url, (body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }

        debug!(%url, size = body.len(), "document fetched");
        Ok(body)
    }
}

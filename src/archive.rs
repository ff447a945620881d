//! In-memory ZIP archive assembly
//!
//! [`ArchiveBuilder`] collects entries keyed by name. Inserting a name that is
//! already present replaces the earlier content in place, keeping the original
//! position. Nothing touches the disk; [`ArchiveBuilder::finish`] returns the
//! serialized ZIP bytes.

use crate::config::Compression;
use crate::error::ArchiveError;
use crate::types::ArchiveEntry;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use tracing::{debug, warn};

/// Accumulates archive entries for one export
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<ArchiveEntry>,
    positions: HashMap<String, usize>,
    compression: Compression,
}

impl ArchiveBuilder {
    /// Create an empty builder using the given compression method
    pub fn new(compression: Compression) -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            compression,
        }
    }

    /// Add an entry, replacing any existing entry with the same name
    ///
    /// Returns `true` when an earlier entry was overwritten.
    pub fn insert(&mut self, entry: ArchiveEntry) -> bool {
        if let Some(&position) = self.positions.get(&entry.entry_name) {
            warn!(
                entry = %entry.entry_name,
                "duplicate entry name, replacing earlier document"
            );
            self.entries[position] = entry;
            return true;
        }

        self.positions
            .insert(entry.entry_name.clone(), self.entries.len());
        self.entries.push(entry);
        false
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in archive order
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.entry_name.as_str())
    }

    /// Serialize all entries into a flat ZIP archive
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Empty`] when there is nothing to write, and
    /// [`ArchiveError::WriteFailed`] when the ZIP writer fails.
    pub fn finish(self) -> std::result::Result<Vec<u8>, ArchiveError> {
        if self.entries.is_empty() {
            return Err(ArchiveError::Empty);
        }

        let options = zip::write::FileOptions::default()
            .compression_method(self.compression.into())
            .unix_permissions(0o644);

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            writer
                .start_file(entry.entry_name.as_str(), options)
                .map_err(|e| ArchiveError::WriteFailed {
                    entry: Some(entry.entry_name.clone()),
                    reason: e.to_string(),
                })?;

            writer
                .write_all(&entry.content)
                .map_err(|e| ArchiveError::WriteFailed {
                    entry: Some(entry.entry_name.clone()),
                    reason: e.to_string(),
                })?;
        }

        let cursor = writer.finish().map_err(|e| ArchiveError::WriteFailed {
            entry: None,
            reason: e.to_string(),
        })?;

        let bytes = cursor.into_inner();
        debug!(
            entries = self.entries.len(),
            size = bytes.len(),
            "archive serialized"
        );
        Ok(bytes)
    }
}

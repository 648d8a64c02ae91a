//! Persisted generation history.
//!
//! One flat JSON list in a single file slot, most-recent-first, capped at
//! ten entries. Every mutation rewrites the whole file (replace-on-write);
//! there is no incremental append at the storage layer. A missing or
//! unparsable file is treated as an empty history, never an error.
//!
//! Single reader/writer per process. Across processes the last writer wins.

use crate::types::FullPaletteResponse;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Maximum retained entries; older ones are evicted on record.
pub const MAX_ENTRIES: usize = 10;

/// File name of the single storage slot.
pub const HISTORY_FILE: &str = "palette-history.json";

/// Bounded most-recent-first list of past generation results.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<FullPaletteResponse>,
}

impl HistoryStore {
    /// Default storage slot under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("paleta")
            .join(HISTORY_FILE)
    }

    /// Load the history at `path`. Corrupt or absent data yields an empty
    /// store; the caller is never failed on load.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<Vec<FullPaletteResponse>>(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unparsable history");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        debug!(path = %path.display(), count = entries.len(), "history loaded");
        Self { path, entries }
    }

    /// Prepend `entry`, evict past the cap, and persist synchronously.
    pub fn record(&mut self, entry: FullPaletteResponse) -> Result<()> {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
        self.save()
    }

    /// Rewrite the entire stored list.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    pub fn entries(&self) -> &[FullPaletteResponse] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The n-th most recent entry (0 = newest).
    pub fn get(&self, index: usize) -> Option<&FullPaletteResponse> {
        self.entries.get(index)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// Tests
// ============================================================================

//! CLI command logic - extracted for testability
//!
//! Pure helpers used by main.rs. Display functions stay in main.rs while
//! input parsing and entry selection live here.

use crate::config::PaletaConfig;
use crate::error::PaletteError;
use crate::types::{FullPaletteResponse, Model};
use tracing::warn;

// ============================================================================
// Word Parsing
// ============================================================================

/// Split a comma-separated input into trimmed, non-empty words and require
/// exactly three of them.
pub fn parse_words(input: &str) -> Result<Vec<String>, PaletteError> {
    let words: Vec<String> = input
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();

    if words.len() != 3 {
        return Err(PaletteError::InvalidInput(
            "enter exactly 3 descriptive words, separated by commas".to_string(),
        ));
    }
    Ok(words)
}

// ============================================================================
// Model Resolution
// ============================================================================

/// CLI flag wins; otherwise the configured default. An unrecognized
/// configured id falls back to flash rather than failing startup.
pub fn resolve_model(flag: Option<Model>, config: &PaletaConfig) -> Model {
    if let Some(model) = flag {
        return model;
    }
    Model::from_id(&config.generation.model).unwrap_or_else(|| {
        warn!(
            configured = %config.generation.model,
            "unknown model id in config, using gemini-2.5-flash"
        );
        Model::Flash
    })
}

// ============================================================================
// History Entry Selection
// ============================================================================

/// Pick the `index`-th most recent entry (0 = newest).
pub fn select_entry(
    entries: &[FullPaletteResponse],
    index: usize,
) -> anyhow::Result<&FullPaletteResponse> {
    if entries.is_empty() {
        anyhow::bail!("history is empty; run `paleta generate` first");
    }
    entries.get(index).ok_or_else(|| {
        anyhow::anyhow!(
            "no history entry {} (have {} entries, newest is 0)",
            index,
            entries.len()
        )
    })
}

// ============================================================================
// Tests
// ============================================================================

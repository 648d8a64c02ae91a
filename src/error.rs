//! Error taxonomy for palette generation.

use thiserror::Error;

/// Errors surfaced by the generation workflow.
///
/// Every variant is terminal for the current attempt; nothing is retried
/// internally and no partial result is produced alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// No API key is selected. A gating state rather than a failure: the
    /// caller is expected to run the credential-selection flow and re-query.
    #[error("No API key selected. Select a Google AI API key to continue.")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote service rejected the credential. The caller revokes its
    /// credential-present state so the selection gate reappears.
    #[error("Your API key is invalid or not found. Please select a valid key.")]
    InvalidApiKey,

    #[error("Failed to generate palette: {0}")]
    GenerationFailed(String),
}

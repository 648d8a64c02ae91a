//! Credential capability for the generation workflow.
//!
//! The original design reached for ambient global state to learn whether an
//! API key was selected. Here the capability is an explicit dependency: the
//! workflow receives a [`CredentialProvider`] and asks it two things only,
//! "is a key present" and "run the selection flow". After selection the
//! status is re-queried rather than assumed true, so a cancelled selection
//! leaves the gate closed.

use anyhow::Result;
use tracing::debug;

/// Environment variable holding the Google AI API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Injected credential capability: query-has-key, request-key-selection.
pub trait CredentialProvider {
    /// Whether a credential is currently available.
    fn has_key(&self) -> bool;

    /// The key material, if present.
    fn api_key(&self) -> Option<String>;

    /// Run the external credential-selection flow. Completion does NOT
    /// imply a key is now present; callers must re-check `has_key`.
    fn request_selection(&self) -> Result<()>;
}

/// Process-environment credential source.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    var: String,
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self {
            var: API_KEY_VAR.to_string(),
        }
    }

    /// Read from a non-default variable (for tests).
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn has_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    fn request_selection(&self) -> Result<()> {
        debug!(var = %self.var, "prompting for credential selection");
        eprintln!("Set {} to a Google AI API key and re-run.", self.var);
        eprintln!("Keys are issued at https://aistudio.google.com/apikey; access may require a configured billing account.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name; the process environment is
    // shared across the test harness threads.

    #[test]
    fn test_missing_var_means_no_key() {
        let provider = EnvCredentialProvider::with_var("PALETA_TEST_KEY_ABSENT");
        assert!(!provider.has_key());
        assert!(provider.api_key().is_none());
    }

    #[test]
    fn test_present_var_means_key() {
        std::env::set_var("PALETA_TEST_KEY_PRESENT", "abc123");
        let provider = EnvCredentialProvider::with_var("PALETA_TEST_KEY_PRESENT");
        assert!(provider.has_key());
        assert_eq!(provider.api_key().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_whitespace_only_var_means_no_key() {
        std::env::set_var("PALETA_TEST_KEY_BLANK", "   ");
        let provider = EnvCredentialProvider::with_var("PALETA_TEST_KEY_BLANK");
        assert!(!provider.has_key());
    }

    #[test]
    fn test_selection_does_not_fabricate_a_key() {
        let provider = EnvCredentialProvider::with_var("PALETA_TEST_KEY_SELECT");
        provider.request_selection().unwrap();
        // Selection completed but no key appeared; the gate stays closed.
        assert!(!provider.has_key());
    }
}

// Library exports for the Paleta palette generator
pub mod cli;
pub mod config;
pub mod contrast;
pub mod credentials;
pub mod error;
pub mod export;
pub mod gemini;
pub mod history;
pub mod preview;
pub mod types;

// Re-export key types for convenience
pub use config::PaletaConfig;
pub use credentials::{CredentialProvider, EnvCredentialProvider};
pub use error::PaletteError;
pub use export::ExportFormat;
pub use gemini::GeminiClient;
pub use history::HistoryStore;
pub use types::{
    AccessibilityInfo, ColorInfo, FullPaletteResponse, Model, Palette, PaletteRole,
    UsageGuideline,
};

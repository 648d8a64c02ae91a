//! Wire contract for the palette generation service.
//!
//! These are the exact shapes the remote service is asked to return
//! (camelCase on the wire). All of them are immutable value objects with
//! structural equality; nothing here carries identity beyond its content.

use serde::{Deserialize, Serialize};

/// One of the five fixed semantic color slots in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
}

impl PaletteRole {
    /// All roles in their fixed presentation order.
    pub fn all() -> [PaletteRole; 5] {
        [
            PaletteRole::Primary,
            PaletteRole::Secondary,
            PaletteRole::Accent,
            PaletteRole::Background,
            PaletteRole::Text,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteRole::Primary => "primary",
            PaletteRole::Secondary => "secondary",
            PaletteRole::Accent => "accent",
            PaletteRole::Background => "background",
            PaletteRole::Text => "text",
        }
    }
}

impl std::fmt::Display for PaletteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single named color with its three representations.
///
/// `hex` is '#' followed by 6 hex digits. The hex/rgb consistency is
/// trusted from the remote service and not re-checked on receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    /// Creative, semantic name (e.g. "Midnight Sky")
    pub name: String,
    /// "#RRGGBB"
    pub hex: String,
    /// [R, G, B], each 0-255
    pub rgb: [u8; 3],
    /// [H, S, L] as integers: 0-360, 0-100, 0-100
    pub hsl: [u16; 3],
}

/// The five-role palette. Exactly these keys, no more, no fewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    pub primary: ColorInfo,
    pub secondary: ColorInfo,
    pub accent: ColorInfo,
    pub background: ColorInfo,
    pub text: ColorInfo,
}

impl Palette {
    pub fn get(&self, role: PaletteRole) -> &ColorInfo {
        match role {
            PaletteRole::Primary => &self.primary,
            PaletteRole::Secondary => &self.secondary,
            PaletteRole::Accent => &self.accent,
            PaletteRole::Background => &self.background,
            PaletteRole::Text => &self.text,
        }
    }

    /// Role/color pairs in the fixed role order.
    pub fn entries(&self) -> [(PaletteRole, &ColorInfo); 5] {
        PaletteRole::all().map(|role| (role, self.get(role)))
    }
}

/// Do/don't guidance for one palette role.
///
/// One guideline per role is expected from the service, but the 1:1
/// cardinality is not enforced; whatever comes back is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageGuideline {
    pub color: PaletteRole,
    #[serde(rename = "do")]
    pub dos: Vec<String>,
    #[serde(rename = "dont")]
    pub donts: Vec<String>,
    pub psychology: String,
}

/// Contrast figures for one (foreground, background) role pair.
///
/// The service is expected to honor wcagAA == (ratio >= 4.5) and
/// wcagAAA == (ratio >= 7.0); the values are displayed as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityInfo {
    /// (foreground, background)
    pub combination: (PaletteRole, PaletteRole),
    #[serde(rename = "contrastRatio")]
    pub contrast_ratio: f64,
    #[serde(rename = "wcagAA")]
    pub wcag_aa: bool,
    #[serde(rename = "wcagAAA")]
    pub wcag_aaa: bool,
}

/// The complete result of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullPaletteResponse {
    pub palette: Palette,
    #[serde(rename = "usageGuidelines")]
    pub usage_guidelines: Vec<UsageGuideline>,
    pub accessibility: Vec<AccessibilityInfo>,
    /// Self-contained HTML mockup; at most two CDN references
    /// (Tailwind CSS and Google Fonts).
    #[serde(rename = "previewHtml")]
    pub preview_html: String,
}

/// Remote model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Model {
    /// gemini-2.5-flash
    Flash,
    /// gemini-2.5-pro
    Pro,
}

impl Model {
    pub fn id(&self) -> &'static str {
        match self {
            Model::Flash => "gemini-2.5-flash",
            Model::Pro => "gemini-2.5-pro",
        }
    }

    pub fn from_id(id: &str) -> Option<Model> {
        match id {
            "gemini-2.5-flash" => Some(Model::Flash),
            "gemini-2.5-pro" => Some(Model::Pro),
            _ => None,
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ============================================================================
// Tests
// ============================================================================

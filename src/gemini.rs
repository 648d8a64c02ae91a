//! Gemini generation client.
//!
//! One request per generation: a natural-language instruction embedding the
//! three input words, a fixed response schema, and temperature 0.8. The
//! response body is JSON matching [`FullPaletteResponse`] exactly; anything
//! else is a [`PaletteError::GenerationFailed`].
//!
//! A client is constructed fresh per call (the caller holds no session
//! between generations), so a just-selected key takes effect immediately.

use crate::error::PaletteError;
use crate::types::{FullPaletteResponse, Model};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default API endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed creativity parameter: varied but reproducible-quality results.
pub const GENERATION_TEMPERATURE: f64 = 0.8;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "paleta/0.1 (https://github.com/paiml/paleta)";

fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}

/// Client for the palette generation endpoint.
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client bound to `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: build_http_client(DEFAULT_TIMEOUT),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint root (for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Generate a full palette response from exactly three descriptive words.
    ///
    /// Callers validate the word list up front; the count is re-checked here
    /// so a bad caller can never reach the network with malformed input.
    /// No retries, no cancellation: the call runs to completion or error.
    #[instrument(name = "paleta.generate", skip(self, words), fields(
        model = model.id(),
        word_count = words.len()
    ))]
    pub async fn generate(
        &self,
        words: &[String],
        model: Model,
    ) -> Result<FullPaletteResponse, PaletteError> {
        if words.len() != 3 || words.iter().any(|w| w.trim().is_empty()) {
            return Err(PaletteError::InvalidInput(
                "expected exactly 3 non-empty descriptive words".to_string(),
            ));
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, model.id());
        let body = json!({
            "contents": [{
                "parts": [{ "text": build_prompt(words) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "temperature": GENERATION_TEMPERATURE,
            }
        });

        debug!(%url, "issuing generation request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_remote_error(&e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_remote_error(&e.to_string()))?;

        if !status.is_success() {
            warn!(%status, "generation request rejected");
            return Err(map_remote_error(&text));
        }

        let envelope: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| map_remote_error(&e.to_string()))?;
        let payload = envelope.first_text().ok_or_else(|| {
            PaletteError::GenerationFailed("empty response from service".to_string())
        })?;

        let result = parse_response(payload)?;
        info!(
            guidelines = result.usage_guidelines.len(),
            combinations = result.accessibility.len(),
            "palette generated"
        );
        Ok(result)
    }
}

/// Build the generation instruction embedding the three words.
pub fn build_prompt(words: &[String]) -> String {
    format!(
        r#"As an expert brand designer, UI/UX developer, and color theorist, generate a professional, aesthetically pleasing 5-color palette and a corresponding SaaS dashboard mockup based on these three words: "{}".

The palette must be harmonious, accessible, and practical for web design.

Provide the following structure in your JSON response:
1.  **Palette**: 5 colors (primary, secondary, accent, background, text) with creative names, hex, RGB, and HSL values. The background color should be suitable for a SaaS application dashboard.
2.  **Usage Guidelines**: For each of the 5 colors, provide a "do" list, a "don't" list, and the color's psychology.
3.  **Accessibility**: Calculate and provide the contrast ratio for all meaningful text/background combinations (e.g., text on background, primary on background, text on primary), and state if they pass WCAG AA and AAA for normal text.
    - Key combinations to check: text on background, text on primary, text on secondary, primary on background, secondary on background.
4.  **Preview HTML**: A single, self-contained HTML string for a polished SaaS dashboard mockup.
    - The HTML MUST use the generated color palette with inline styles or a style block.
    - It MUST use Tailwind CSS via the CDN ('https://cdn.tailwindcss.com').
    - It MUST include Google Fonts ('Inter').
    - The design should be modern, clean, and visually appealing, reflecting the input words.
    - It MUST NOT contain any external script tags other than Tailwind CSS and Google Fonts.
    - All styling should be done with Tailwind classes directly in the HTML elements.
    - Use placeholder comments for icons (e.g., <!-- icon: chart -->) instead of actual SVG tags to keep the HTML clean and concise."#,
        words.join(", ")
    )
}

/// Structured-output schema sent with every request. Mirrors
/// [`FullPaletteResponse`]: all four top-level fields required.
pub fn response_schema() -> Value {
    let color_info = json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "A creative, semantic name for the color (e.g., \"Midnight Sky\")." },
            "hex": { "type": "STRING", "description": "The hex code of the color (e.g., \"#0A192F\")." },
            "rgb": { "type": "ARRAY", "items": { "type": "INTEGER" }, "description": "The RGB values [R, G, B]." },
            "hsl": { "type": "ARRAY", "items": { "type": "INTEGER" }, "description": "The HSL values [H, S, L]." }
        },
        "required": ["name", "hex", "rgb", "hsl"]
    });

    let mut palette_properties = serde_json::Map::new();
    for (role, description) in [
        ("primary", "Primary action color (buttons, links)."),
        ("secondary", "Secondary elements (borders, cards)."),
        ("accent", "Highlights, badges, notifications."),
        ("background", "Main page background."),
        ("text", "Main text color."),
    ] {
        let mut schema = color_info.clone();
        schema["description"] = json!(description);
        palette_properties.insert(role.to_string(), schema);
    }

    json!({
        "type": "OBJECT",
        "properties": {
            "palette": {
                "type": "OBJECT",
                "properties": palette_properties,
                "required": ["primary", "secondary", "accent", "background", "text"]
            },
            "usageGuidelines": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "color": { "type": "STRING", "description": "The role of the color (primary, secondary, etc.)." },
                        "do": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "List of recommended uses." },
                        "dont": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "List of things to avoid." },
                        "psychology": { "type": "STRING", "description": "A brief explanation of the color's psychological impact in this context." }
                    },
                    "required": ["color", "do", "dont", "psychology"]
                }
            },
            "accessibility": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "combination": { "type": "ARRAY", "items": { "type": "STRING" }, "description": "The two color roles being compared (e.g., [\"text\", \"background\"])." },
                        "contrastRatio": { "type": "NUMBER", "description": "The calculated contrast ratio." },
                        "wcagAA": { "type": "BOOLEAN", "description": "Passes WCAG AA for normal text (ratio >= 4.5)." },
                        "wcagAAA": { "type": "BOOLEAN", "description": "Passes WCAG AAA for normal text (ratio >= 7.0)." }
                    },
                    "required": ["combination", "contrastRatio", "wcagAA", "wcagAAA"]
                }
            },
            "previewHtml": {
                "type": "STRING",
                "description": "A single, self-contained HTML string for a SaaS dashboard mockup using the generated palette and Tailwind CSS."
            }
        },
        "required": ["palette", "usageGuidelines", "accessibility", "previewHtml"]
    })
}

/// Parse the model's JSON text into a typed response.
///
/// Parse failure or any absent top-level field is an invalid structure;
/// never an unhandled fault.
pub fn parse_response(text: &str) -> Result<FullPaletteResponse, PaletteError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|_| {
        PaletteError::GenerationFailed("invalid response structure".to_string())
    })?;

    for field in ["palette", "usageGuidelines", "accessibility", "previewHtml"] {
        if value.get(field).is_none() {
            return Err(PaletteError::GenerationFailed(
                "invalid response structure".to_string(),
            ));
        }
    }

    serde_json::from_value(value)
        .map_err(|_| PaletteError::GenerationFailed("invalid response structure".to_string()))
}

/// Map a remote failure message to the typed taxonomy.
///
/// The two key-rejection signatures become [`PaletteError::InvalidApiKey`];
/// everything else is a generic, retry-suggesting failure.
pub fn map_remote_error(message: &str) -> PaletteError {
    if message.contains("API key not valid") || message.contains("Requested entity was not found")
    {
        PaletteError::InvalidApiKey
    } else {
        PaletteError::GenerationFailed(
            "the AI service could not complete the request".to_string(),
        )
    }
}

// ============================================================================
// Response envelope (service side)
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

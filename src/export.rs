//! Derived export formats for a palette.
//!
//! Pure functions: same palette in, byte-identical text out, role order
//! fixed (primary, secondary, accent, background, text). Variable names in
//! the css/scss outputs are kebab-cased; tailwind and json keep the
//! original casing.

use crate::types::Palette;
use serde::{Deserialize, Serialize};

/// The four textual representations offered per palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Css,
    Scss,
    Tailwind,
    Json,
}

impl ExportFormat {
    pub fn all() -> [ExportFormat; 4] {
        [
            ExportFormat::Css,
            ExportFormat::Scss,
            ExportFormat::Tailwind,
            ExportFormat::Json,
        ]
    }

    /// Human title, as shown above each export block.
    pub fn title(&self) -> &'static str {
        match self {
            ExportFormat::Css => "CSS Variables",
            ExportFormat::Scss => "SCSS Variables",
            ExportFormat::Tailwind => "Tailwind Config",
            ExportFormat::Json => "JSON",
        }
    }

    /// Render `palette` in this format.
    pub fn render(&self, palette: &Palette) -> String {
        match self {
            ExportFormat::Css => render_css(palette),
            ExportFormat::Scss => render_scss(palette),
            ExportFormat::Tailwind => render_tailwind(palette),
            ExportFormat::Json => render_json(palette),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Tailwind => "tailwind",
            ExportFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// camelCase → kebab-case for variable naming (e.g. `backgroundAlt` →
/// `background-alt`).
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn render_css(palette: &Palette) -> String {
    let mut out = String::from(":root {\n");
    for (role, color) in palette.entries() {
        out.push_str(&format!("  --{}: {};\n", kebab_case(role.as_str()), color.hex));
    }
    out.push('}');
    out
}

fn render_scss(palette: &Palette) -> String {
    let mut out = String::new();
    for (role, color) in palette.entries() {
        out.push_str(&format!("${}: {};\n", kebab_case(role.as_str()), color.hex));
    }
    out.pop(); // no trailing newline
    out
}

fn render_tailwind(palette: &Palette) -> String {
    let mut out = String::from("// tailwind.config.js\n");
    out.push_str("module.exports = {\n");
    out.push_str("  theme: {\n");
    out.push_str("    extend: {\n");
    out.push_str("      colors: {\n");
    for (role, color) in palette.entries() {
        out.push_str(&format!("        {}: '{}',\n", role.as_str(), color.hex));
    }
    out.push_str("      },\n");
    out.push_str("    },\n");
    out.push_str("  },\n");
    out.push_str("};");
    out
}

fn render_json(palette: &Palette) -> String {
    // Pretty printer uses 2-space indentation; the dump is the palette
    // exactly as received.
    serde_json::to_string_pretty(palette).expect("palette serialization cannot fail")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorInfo;

    fn color(name: &str, hex: &str) -> ColorInfo {
        ColorInfo {
            name: name.to_string(),
            hex: hex.to_string(),
            rgb: [0, 0, 0],
            hsl: [0, 0, 0],
        }
    }

    fn palette() -> Palette {
        Palette {
            primary: color("Royal", "#2563EB"),
            secondary: color("Slate", "#64748B"),
            accent: color("Amber", "#F59E0B"),
            background: color("Snow", "#F8FAFC"),
            text: color("Charcoal", "#0F172A"),
        }
    }

    #[test]
    fn test_kebab_case_camel_boundary() {
        assert_eq!(kebab_case("backgroundAlt"), "background-alt");
        assert_eq!(kebab_case("primary"), "primary");
        assert_eq!(kebab_case("brandPrimaryDark"), "brand-primary-dark");
    }

    #[test]
    fn test_css_block_shape() {
        let css = ExportFormat::Css.render(&palette());
        assert!(css.starts_with(":root {\n"));
        assert!(css.ends_with('}'));
        assert!(css.contains("  --primary: #2563EB;"));
        assert!(css.contains("  --text: #0F172A;"));
    }

    #[test]
    fn test_css_role_order() {
        let css = ExportFormat::Css.render(&palette());
        let primary = css.find("--primary").unwrap();
        let secondary = css.find("--secondary").unwrap();
        let accent = css.find("--accent").unwrap();
        let background = css.find("--background").unwrap();
        let text = css.find("--text").unwrap();
        assert!(primary < secondary && secondary < accent);
        assert!(accent < background && background < text);
    }

    #[test]
    fn test_scss_assignments() {
        let scss = ExportFormat::Scss.render(&palette());
        assert!(scss.starts_with("$primary: #2563EB;"));
        assert!(scss.ends_with("$text: #0F172A;"));
        assert_eq!(scss.lines().count(), 5);
    }

    #[test]
    fn test_tailwind_preserves_role_casing() {
        let tailwind = ExportFormat::Tailwind.render(&palette());
        assert!(tailwind.starts_with("// tailwind.config.js"));
        assert!(tailwind.contains("        primary: '#2563EB',"));
        assert!(tailwind.contains("colors: {"));
        assert!(tailwind.ends_with("};"));
    }

    #[test]
    fn test_json_round_trips_palette() {
        let dump = ExportFormat::Json.render(&palette());
        let back: Palette = serde_json::from_str(&dump).unwrap();
        assert_eq!(back, palette());
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let dump = ExportFormat::Json.render(&palette());
        assert!(dump.contains("\n  \"primary\": {"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let p = palette();
        for format in ExportFormat::all() {
            assert_eq!(format.render(&p), format.render(&p), "{format} not pure");
        }
    }

    #[test]
    fn test_format_titles() {
        assert_eq!(ExportFormat::Css.title(), "CSS Variables");
        assert_eq!(ExportFormat::Tailwind.title(), "Tailwind Config");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_hex() -> impl Strategy<Value = String> {
            "[0-9A-F]{6}".prop_map(|h| format!("#{h}"))
        }

        proptest! {
            #[test]
            fn css_has_one_line_per_role(hex in arb_hex()) {
                let mut p = palette();
                p.accent.hex = hex;
                let css = ExportFormat::Css.render(&p);
                prop_assert_eq!(css.lines().count(), 7); // :root { + 5 roles + }
            }

            #[test]
            fn every_format_contains_every_hex(hex in arb_hex()) {
                let mut p = palette();
                p.background.hex = hex.clone();
                for format in ExportFormat::all() {
                    prop_assert!(format.render(&p).contains(&hex));
                }
            }
        }
    }
}

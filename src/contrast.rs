//! Local WCAG contrast audit.
//!
//! The generation workflow displays the service-reported contrast figures
//! as received; it never recomputes them. This module is the separate,
//! read-only audit behind `paleta check`: it rederives each ratio from the
//! returned hex values with the WCAG relative-luminance formula and reports
//! where the service's own numbers disagree.

use crate::types::{FullPaletteResponse, Palette, PaletteRole};
use tracing::warn;

/// WCAG normal-text thresholds.
pub const WCAG_AA_RATIO: f64 = 4.5;
pub const WCAG_AAA_RATIO: f64 = 7.0;

/// Reported ratios within this distance of the recomputed value count as
/// agreeing; the service rounds its figures.
pub const RATIO_TOLERANCE: f64 = 0.25;

/// Relative luminance of an sRGB color, per WCAG 2.x.
pub fn relative_luminance(rgb: [u8; 3]) -> f64 {
    let [r, g, b] = rgb.map(linearize);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Contrast ratio between two colors, always >= 1.
pub fn contrast_ratio(a: [u8; 3], b: [u8; 3]) -> f64 {
    let (l1, l2) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Decode "#RRGGBB". Anything else is None.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some([r, g, b])
}

/// One audited combination: service-reported figures next to the locally
/// recomputed ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastFinding {
    pub combination: (PaletteRole, PaletteRole),
    pub reported_ratio: f64,
    pub computed_ratio: f64,
    pub reported_aa: bool,
    pub reported_aaa: bool,
    pub computed_aa: bool,
    pub computed_aaa: bool,
}

impl ContrastFinding {
    pub fn ratio_agrees(&self) -> bool {
        (self.reported_ratio - self.computed_ratio).abs() <= RATIO_TOLERANCE
    }

    pub fn flags_agree(&self) -> bool {
        self.reported_aa == self.computed_aa && self.reported_aaa == self.computed_aaa
    }

    pub fn is_consistent(&self) -> bool {
        self.ratio_agrees() && self.flags_agree()
    }
}

fn role_rgb(palette: &Palette, role: PaletteRole) -> Option<[u8; 3]> {
    let color = palette.get(role);
    let rgb = parse_hex(&color.hex);
    if rgb.is_none() {
        warn!(role = %role, hex = %color.hex, "unparsable hex, combination skipped");
    }
    rgb
}

/// Recompute every reported combination from the palette's hex values.
/// Combinations whose hex fails to decode are skipped.
pub fn audit(response: &FullPaletteResponse) -> Vec<ContrastFinding> {
    response
        .accessibility
        .iter()
        .filter_map(|info| {
            let (fg_role, bg_role) = info.combination;
            let fg = role_rgb(&response.palette, fg_role)?;
            let bg = role_rgb(&response.palette, bg_role)?;
            let computed = contrast_ratio(fg, bg);
            Some(ContrastFinding {
                combination: info.combination,
                reported_ratio: info.contrast_ratio,
                computed_ratio: computed,
                reported_aa: info.wcag_aa,
                reported_aaa: info.wcag_aaa,
                computed_aa: computed >= WCAG_AA_RATIO,
                computed_aaa: computed >= WCAG_AAA_RATIO,
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

/// Integration tests for the paleta CLI: input gating, exports, history,
/// preview, and the local contrast audit. No test reaches the network.
use assert_cmd::Command;
use paleta::history::HistoryStore;
use paleta::types::{AccessibilityInfo, ColorInfo, FullPaletteResponse, Palette, PaletteRole};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Working directory with a `.paleta.toml` pointing history at a local file.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".paleta.toml"),
        "version = \"1.0\"\n\n[history]\npath = \"history.json\"\n",
    )
    .unwrap();
    dir
}

fn sample_response() -> FullPaletteResponse {
    let color = |name: &str, hex: &str, rgb: [u8; 3]| ColorInfo {
        name: name.to_string(),
        hex: hex.to_string(),
        rgb,
        hsl: [210, 50, 50],
    };
    FullPaletteResponse {
        palette: Palette {
            primary: color("Royal Blue", "#2563EB", [37, 99, 235]),
            secondary: color("Slate", "#64748B", [100, 116, 139]),
            accent: color("Amber Pop", "#F59E0B", [245, 158, 11]),
            background: color("Snow", "#FFFFFF", [255, 255, 255]),
            text: color("Charcoal", "#000000", [0, 0, 0]),
        },
        usage_guidelines: vec![],
        accessibility: vec![AccessibilityInfo {
            combination: (PaletteRole::Text, PaletteRole::Background),
            contrast_ratio: 21.0,
            wcag_aa: true,
            wcag_aaa: true,
        }],
        preview_html: "<html><head><script src=\"https://cdn.tailwindcss.com\"></script></head><body>mock</body></html>".to_string(),
    }
}

fn seed_history(dir: &TempDir) {
    let mut store = HistoryStore::load(dir.path().join("history.json"));
    store.record(sample_response()).unwrap();
}

fn paleta_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("paleta").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

/// Two words are rejected before any network call is attempted.
#[test]
fn test_generate_rejects_two_words() {
    let dir = workspace();
    paleta_in(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .arg("generate")
        .arg("red, blue")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

/// With no credential the generation trigger is inert.
#[test]
fn test_generate_blocked_without_credential() {
    let dir = workspace();
    paleta_in(&dir)
        .env_remove("GEMINI_API_KEY")
        .arg("generate")
        .arg("bold, creative, modern")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key selected"));
}

#[test]
fn test_export_css_from_history() {
    let dir = workspace();
    seed_history(&dir);

    paleta_in(&dir)
        .arg("export")
        .arg("css")
        .assert()
        .success()
        .stdout(predicate::str::contains(":root {"))
        .stdout(predicate::str::contains("--primary: #2563EB;"));
}

#[test]
fn test_export_scss_from_history() {
    let dir = workspace();
    seed_history(&dir);

    paleta_in(&dir)
        .arg("export")
        .arg("scss")
        .assert()
        .success()
        .stdout(predicate::str::contains("$primary: #2563EB;"));
}

/// The json export parses back into a structurally equal palette.
#[test]
fn test_export_json_round_trips() {
    let dir = workspace();
    seed_history(&dir);

    let output = paleta_in(&dir)
        .arg("export")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let palette: Palette = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(palette, sample_response().palette);
}

#[test]
fn test_export_with_empty_history_fails() {
    let dir = workspace();
    paleta_in(&dir)
        .arg("export")
        .arg("css")
        .assert()
        .failure()
        .stderr(predicate::str::contains("history is empty"));
}

#[test]
fn test_history_gallery_lists_entries() {
    let dir = workspace();
    seed_history(&dir);

    paleta_in(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent palettes"))
        .stdout(predicate::str::contains("Royal Blue"));
}

#[test]
fn test_history_entry_shows_full_palette() {
    let dir = workspace();
    seed_history(&dir);

    paleta_in(&dir)
        .arg("history")
        .arg("--entry")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("#2563EB"))
        .stdout(predicate::str::contains("text on background"));
}

#[test]
fn test_history_out_of_range_entry_fails() {
    let dir = workspace();
    seed_history(&dir);

    paleta_in(&dir)
        .arg("history")
        .arg("--entry")
        .arg("7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no history entry 7"));
}

#[test]
fn test_preview_writes_named_file() {
    let dir = workspace();
    seed_history(&dir);
    let out = dir.path().join("mockup.html");

    paleta_in(&dir)
        .arg("preview")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview written to"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("cdn.tailwindcss.com"));
}

#[test]
fn test_preview_without_out_prints_document() {
    let dir = workspace();
    seed_history(&dir);

    paleta_in(&dir)
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("<html>"));
}

#[test]
fn test_check_audits_reported_figures() {
    let dir = workspace();
    seed_history(&dir);

    paleta_in(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local WCAG audit"))
        .stdout(predicate::str::contains("combinations agree"));
}

/// Ten records is the ceiling regardless of how many are made.
#[test]
fn test_history_capped_at_ten() {
    let dir = workspace();
    let path = dir.path().join("history.json");
    let mut store = HistoryStore::load(&path);
    for _ in 0..14 {
        store.record(sample_response()).unwrap();
    }

    let raw = fs::read_to_string(&path).unwrap();
    let list: Vec<FullPaletteResponse> = serde_json::from_str(&raw).unwrap();
    assert_eq!(list.len(), 10);
}

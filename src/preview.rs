//! Preview document handling.
//!
//! The service returns the mockup as one self-contained HTML string. It is
//! exposed two ways: written to a caller-named file, or materialized behind
//! a transient temp-file handle that is revoked (deleted) when the handle
//! is dropped, i.e. when superseded or on teardown.
//!
//! The document is expected to reference at most two external resources,
//! the Tailwind CDN and Google Fonts; anything beyond that is reported so
//! the caller can warn.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// External resource prefixes the preview document may reference.
pub const ALLOWED_REFERENCE_PREFIXES: [&str; 3] = [
    "https://cdn.tailwindcss.com",
    "https://fonts.googleapis.com",
    "https://fonts.gstatic.com",
];

/// A materialized preview whose backing file is deleted on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    file: NamedTempFile,
}

impl PreviewHandle {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Write the document behind a revocable temp-file handle.
pub fn write_temp(html: &str) -> Result<PreviewHandle> {
    let file = tempfile::Builder::new()
        .prefix("paleta-preview-")
        .suffix(".html")
        .tempfile()
        .context("failed to create preview file")?;
    fs::write(file.path(), html).context("failed to write preview document")?;
    debug!(path = %file.path().display(), bytes = html.len(), "preview materialized");
    Ok(PreviewHandle { file })
}

/// Write the document to a caller-named path.
pub fn write_to(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)
        .with_context(|| format!("failed to write preview to {}", path.display()))?;
    debug!(path = %path.display(), bytes = html.len(), "preview written");
    Ok(())
}

/// All http(s) URLs referenced via src/href attributes.
pub fn external_references(html: &str) -> Vec<String> {
    let mut refs = Vec::new();
    for attr in ["src=\"", "href=\""] {
        let mut rest = html;
        while let Some(start) = rest.find(attr) {
            rest = &rest[start + attr.len()..];
            if let Some(end) = rest.find('"') {
                let url = &rest[..end];
                if url.starts_with("http://") || url.starts_with("https://") {
                    refs.push(url.to_string());
                }
                rest = &rest[end..];
            } else {
                break;
            }
        }
    }
    refs
}

/// External references outside the allowed CDN set.
pub fn disallowed_references(html: &str) -> Vec<String> {
    external_references(html)
        .into_iter()
        .filter(|url| {
            !ALLOWED_REFERENCE_PREFIXES
                .iter()
                .any(|prefix| url.starts_with(prefix))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PREVIEW: &str = r#"<html><head>
        <script src="https://cdn.tailwindcss.com"></script>
        <link href="https://fonts.googleapis.com/css2?family=Inter" rel="stylesheet">
        </head><body><h1>Mockup</h1></body></html>"#;

    #[test]
    fn test_temp_handle_holds_content() {
        let handle = write_temp(PREVIEW).unwrap();
        let read = fs::read_to_string(handle.path()).unwrap();
        assert_eq!(read, PREVIEW);
    }

    #[test]
    fn test_temp_handle_revokes_on_drop() {
        let path = {
            let handle = write_temp(PREVIEW).unwrap();
            handle.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_write_to_named_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("preview").join("mockup.html");
        write_to(PREVIEW, &out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), PREVIEW);
    }

    #[test]
    fn test_external_references_found() {
        let refs = external_references(PREVIEW);
        assert_eq!(refs.len(), 2);
        assert!(refs[0].starts_with("https://cdn.tailwindcss.com"));
    }

    #[test]
    fn test_allowed_cdns_pass() {
        assert!(disallowed_references(PREVIEW).is_empty());
    }

    #[test]
    fn test_foreign_script_is_reported() {
        let html = r#"<script src="https://evil.example.com/x.js"></script>"#;
        let bad = disallowed_references(html);
        assert_eq!(bad, vec!["https://evil.example.com/x.js".to_string()]);
    }

    #[test]
    fn test_relative_references_ignored() {
        let html = r##"<img src="logo.png"><a href="#top">top</a>"##;
        assert!(external_references(html).is_empty());
    }
}

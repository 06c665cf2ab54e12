//! Artifact storage infrastructure.
//!
//! Implements the `ArtifactStore` trait from `agentcast-core` over a flat
//! local directory, plus MIME detection for downloads.

use std::path::Path;

pub mod filesystem;

pub use filesystem::LocalArtifactStore;

/// Detect MIME type from file extension.
pub fn detect_mime(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        // Text
        "txt" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "xml" => "text/xml",
        "yaml" | "yml" => "text/yaml",
        "toml" => "text/toml",
        "py" => "text/x-python",
        "rs" => "text/x-rust",
        "json" => "application/json",

        // Documents
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",

        "zip" => "application/zip",

        _ => "application/octet-stream",
    }
}

/// Whether a MIME type is served as UTF-8 text.
pub fn is_text_mime(mime: &str) -> bool {
    mime.starts_with("text/") || mime == "application/json"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime() {
        assert_eq!(detect_mime("report.csv"), "text/csv");
        assert_eq!(detect_mime("notes.MD"), "text/markdown");
        assert_eq!(detect_mime("data.json"), "application/json");
        assert_eq!(detect_mime("summary.pdf"), "application/pdf");
        assert_eq!(detect_mime("unknown.xyz"), "application/octet-stream");
        assert_eq!(detect_mime("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_is_text_mime() {
        assert!(is_text_mime("text/plain"));
        assert!(is_text_mime("application/json"));
        assert!(!is_text_mime("application/pdf"));
        assert!(!is_text_mime("application/octet-stream"));
    }
}

// src/document/models.rs
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How the document's text is recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    PlainText,
    Pdf,
}

impl DocumentKind {
    /// Decides the kind from the file extension (`.pdf`, any case, is a PDF).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => DocumentKind::Pdf,
            _ => DocumentKind::PlainText,
        }
    }
}

/// A results document whose text has been recovered and is ready for extraction
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub text: String,
}

/// Settings for reading documents. Built once from the CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Upper bound on the source file size in bytes
    pub max_bytes: u64,
    /// External PDF-to-text program, invoked as `<program> -layout <file> -`
    pub pdftotext_program: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            pdftotext_program: "pdftotext".to_string(),
        }
    }
}

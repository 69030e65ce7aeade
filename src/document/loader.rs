// src/document/loader.rs
use crate::document::models::{DocumentKind, LoaderConfig, SourceDocument};
use crate::utils::error::DocumentError;
use std::path::Path;
use tokio::process::Command;

/// Reads a results document and recovers its text.
/// Plain text is read directly; PDFs go through the external converter.
pub async fn load_document(path: &Path, config: &LoaderConfig) -> Result<SourceDocument, DocumentError> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DocumentError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(DocumentError::Io(e)),
    };

    // --- Size cap ---
    if metadata.len() > config.max_bytes {
        tracing::error!("Document {} is {} bytes (limit {})", path.display(), metadata.len(), config.max_bytes);
        return Err(DocumentError::TooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
            limit: config.max_bytes,
        });
    }

    let kind = DocumentKind::from_path(path);
    tracing::info!("Loading {:?} document: {} ({} bytes)", kind, path.display(), metadata.len());

    let text = match kind {
        DocumentKind::PlainText => read_text(path).await?,
        DocumentKind::Pdf => convert_pdf(path, &config.pdftotext_program).await?,
    };

    tracing::debug!("Recovered {} bytes of text from {}", text.len(), path.display());
    Ok(SourceDocument {
        path: path.to_path_buf(),
        kind,
        text,
    })
}

async fn read_text(path: &Path) -> Result<String, DocumentError> {
    let bytes = tokio::fs::read(path).await?;
    String::from_utf8(bytes).map_err(|e| DocumentError::Encoding(format!("{}: {}", path.display(), e)))
}

/// Runs `<program> -layout <file> -` and captures stdout as the document text.
async fn convert_pdf(path: &Path, program: &str) -> Result<String, DocumentError> {
    tracing::debug!("Converting PDF with '{}'", program);

    let output = Command::new(program)
        .arg("-layout")
        .arg(path)
        .arg("-")
        .output()
        .await?; // Spawn failures (converter not installed) surface as I/O errors

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::error!("Converter '{}' exited with {} for {}", program, output.status, path.display());
        return Err(DocumentError::Converter {
            program: program.to_string(),
            stderr,
        });
    }

    // Converters occasionally emit stray bytes; lossy decoding keeps the rest usable
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        fs::write(&path, "Regional Duals\n152 lbs\nJohn Smith 5-2 1st pin\n").unwrap();

        let doc = tokio_test::block_on(load_document(&path, &LoaderConfig::default())).unwrap();
        assert_eq!(doc.kind, DocumentKind::PlainText);
        assert!(doc.text.starts_with("Regional Duals"));
        assert_eq!(doc.path, path);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");

        let err = tokio_test::block_on(load_document(&path, &LoaderConfig::default())).unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)), "unexpected error: {:?}", err);
    }

    #[test]
    fn test_size_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "x".repeat(64)).unwrap();
        let config = LoaderConfig { max_bytes: 16, ..LoaderConfig::default() };

        let err = tokio_test::block_on(load_document(&path, &config)).unwrap_err();
        assert!(matches!(err, DocumentError::TooLarge { size: 64, limit: 16, .. }));
    }

    #[test]
    fn test_invalid_utf8_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let err = tokio_test::block_on(load_document(&path, &LoaderConfig::default())).unwrap_err();
        assert!(matches!(err, DocumentError::Encoding(_)));
    }

    #[test]
    fn test_missing_converter_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();
        let config = LoaderConfig {
            pdftotext_program: "definitely-not-a-real-pdftotext-binary".to_string(),
            ..LoaderConfig::default()
        };

        let err = tokio_test::block_on(load_document(&path, &config)).unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)), "unexpected error: {:?}", err);
    }
}

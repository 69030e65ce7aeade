// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error reading document: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document {path} is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("Document is not valid UTF-8 text: {0}")]
    Encoding(String),

    #[error("Text converter '{program}' failed: {stderr}")]
    Converter { program: String, stderr: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document read failed: {0}")]
    Document(#[from] DocumentError), // The only fatal path around extraction

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_keeps_cause_in_message() {
        let err = AppError::from(DocumentError::Converter {
            program: "pdftotext".to_string(),
            stderr: "Syntax Error: Couldn't read xref table".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.starts_with("Document read failed"));
        assert!(msg.contains("Couldn't read xref table"));
    }

    #[test]
    fn test_too_large_message() {
        let err = DocumentError::TooLarge { path: "meet.pdf".to_string(), size: 20, limit: 10 };
        assert_eq!(err.to_string(), "Document meet.pdf is 20 bytes, exceeding the 10 byte limit");
    }
}

// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::document::SourceDocument;
use crate::extractors::ExtractionResult;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Directory holding every artifact for one competition: /base_dir/<slug>/
    pub fn competition_dir(&self, result: &ExtractionResult) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(slugify(result.competition_name()));

        if !target_dir.exists() {
            fs::create_dir_all(&target_dir)
                .map_err(StorageError::IoError)?;
        }

        Ok(target_dir)
    }

    /// Path of a named artifact, e.g. `<slug>/<slug>_results.json`
    fn artifact_path(&self, result: &ExtractionResult, suffix: &str) -> Result<PathBuf, StorageError> {
        let slug = slugify(result.competition_name());
        Ok(self.competition_dir(result)?.join(format!("{}_{}", slug, suffix)))
    }

    /// Saves the full extraction result as pretty-printed JSON
    pub fn save_result(&self, result: &ExtractionResult) -> Result<PathBuf, StorageError> {
        let file_path = self.artifact_path(result, "results.json")?;

        let json = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved extraction result to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the split raw lines so a coach can correct misparsed entries by hand
    pub fn save_raw_text(&self, result: &ExtractionResult) -> Result<PathBuf, StorageError> {
        let file_path = self.artifact_path(result, "raw.txt")?;

        fs::write(&file_path, result.raw_lines().join("\n"))
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved raw text to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a rendered newsletter summary next to the result
    pub fn save_summary(&self, result: &ExtractionResult, markdown: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.artifact_path(result, "summary.md")?;

        fs::write(&file_path, markdown)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved summary to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the extraction run in JSON format
    pub fn save_metadata(
        &self,
        result: &ExtractionResult,
        source: &SourceDocument,
        strategy: Option<&str>,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.artifact_path(result, "meta.json")?;

        let metadata = serde_json::json!({
            "competition_name": result.competition_name(),
            "date": result.date(),
            "source_path": source.path.display().to_string(),
            "source_kind": source.kind,
            "athlete_count": result.athletes().len(),
            "raw_line_count": result.raw_lines().len(),
            "strategy": strategy,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// Reads a stored result back. Only `athletes` is required; anything else
    /// missing from the blob falls back to empty values.
    pub fn load_result<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult, StorageError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(StorageError::IoError)?;

        let result: ExtractionResult = serde_json::from_str(&contents)
            .map_err(|e| StorageError::SerializationError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded {} athletes from {}", result.athletes().len(), path.display());
        Ok(result)
    }
}

/// Lowercase, non-alphanumerics collapsed to single dashes
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "competition".to_string()
    } else {
        slug.to_string()
    }
}

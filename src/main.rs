// src/main.rs
use clap::Parser;
use meet_extractor::config::{AppConfig, Args, RunMode};
use meet_extractor::extractors::{self, ResultExtractor};
use meet_extractor::storage::StorageManager;
use meet_extractor::utils::{self, error::StorageError, AppError};
use meet_extractor::{document, report};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments into an explicit config
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);
    let config = AppConfig::from_args(args)?;

    // 3. Initialize storage
    let storage = StorageManager::new(&config.output_dir)?;

    match &config.mode {
        RunMode::Extract { input } => extract_document(&config, &storage, input).await,
        RunMode::Summarize { results_path } => summarize_stored(&config, &storage, results_path),
    }
}

async fn extract_document(config: &AppConfig, storage: &StorageManager, input: &Path) -> Result<(), AppError> {
    let extractor = ResultExtractor::with_config(config.extractor.clone());

    // 4. Read the document. This is the only step allowed to fail the run.
    let source = document::load_document(input, &config.loader).await?;
    tracing::info!("Loaded document ({} bytes of text)", source.text.len());

    // 5. Extract. Never fails; an empty athlete list is still a valid result.
    let outcome = extractor.run(&source.text);
    let result = &outcome.result;
    if result.athletes().is_empty() {
        tracing::warn!(
            "No athlete data could be extracted from {}; raw text is saved for manual review",
            source.path.display()
        );
    }

    // 6. Persist result, raw text and metadata
    storage.save_result(result)?;
    storage.save_raw_text(result)?;
    storage.save_metadata(result, &source, outcome.strategy)?;

    if config.write_summary {
        let markdown = report::render_summary(result);
        storage.save_summary(result, &markdown)?;
    }

    if config.debug {
        let debug_dir = storage.competition_dir(result)?.join("debug");
        std::fs::create_dir_all(&debug_dir)?;
        let debug_html_path = debug_dir.join("annotated.html");
        let patterns = extractors::results::debug_patterns();
        if let Err(e) = utils::debug::create_debug_html(&source.text, &debug_html_path, &patterns) {
            tracing::warn!("Failed to create debug HTML: {}", e);
        } else {
            tracing::info!("Created annotated debug HTML: {}", debug_html_path.display());
        }
    }

    if config.print {
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        println!("{}", json);
    }

    tracing::info!(
        "Processing finished. {} athletes recorded for '{}'",
        result.athletes().len(),
        result.competition_name()
    );

    Ok(())
}

fn summarize_stored(config: &AppConfig, storage: &StorageManager, results_path: &Path) -> Result<(), AppError> {
    // 4. Read the stored blob; only a missing athlete list is rejected
    let (result, markdown) = report::render_stored_summary(storage, results_path)?;
    if result.athletes().is_empty() {
        tracing::warn!("Stored result {} has no athlete data", results_path.display());
    }

    // 5. Write the summary next to the other artifacts for this competition
    let summary_path = storage.save_summary(&result, &markdown)?;
    tracing::info!("Rendered summary for '{}' to {}", result.competition_name(), summary_path.display());

    if config.print {
        println!("{}", markdown);
    }

    Ok(())
}

// src/lib.rs
pub mod config;
pub mod document;
pub mod extractors;
pub mod report;
pub mod storage;
pub mod utils;

pub use extractors::{extract, ExtractionResult, ResultExtractor};
pub use utils::AppError;

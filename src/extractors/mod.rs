// src/extractors/mod.rs
pub mod results;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use results::{
    extract,
    AthleteRecord,
    AthleteRoster,
    ExtractionOutcome,
    ExtractionResult,
    ExtractionStrategy,
    ExtractorConfig,
    LooseLineStrategy,
    ResultExtractor,
    WeightAnchoredStrategy,
};

// src/document/mod.rs
pub mod loader;
pub mod models;

pub use loader::load_document;
#[allow(unused_imports)]
pub use models::{DocumentKind, LoaderConfig, SourceDocument};

//! # promptdeck-catalog
//!
//! The prompt catalog and its loading fallback chain: the remote catalog
//! first, then the bundled JSON file, then the bundled plain-text file.
//! The first source that yields prompts wins; sources are never merged.

pub mod errors;
pub mod loader;
pub mod sources;
pub mod types;

pub use errors::{CatalogError, CatalogResult, SourceFailure};
pub use loader::CatalogLoader;
pub use sources::{FetchFuture, JsonFileSource, PromptSource, StaticSource, TextFileSource};
pub use types::{Catalog, CatalogOrigin, Prompt};

//! CatalogLoader: ordered fallback over prompt sources.

use std::path::Path;

use tracing::{info, warn};

use promptdeck_core::config::CatalogConfig;

use crate::errors::{CatalogError, CatalogResult, SourceFailure};
use crate::sources::{JsonFileSource, PromptSource, TextFileSource};
use crate::types::Catalog;

/// Tries each source in order and keeps the first non-empty result.
#[derive(Default)]
pub struct CatalogLoader {
    sources: Vec<Box<dyn PromptSource>>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: `remote` (if any), then the configured JSON and
    /// text files resolved against `root`.
    pub fn from_config(
        config: &CatalogConfig,
        root: &Path,
        remote: Option<Box<dyn PromptSource>>,
    ) -> Self {
        let mut loader = Self::new();
        if let Some(remote) = remote {
            loader.sources.push(remote);
        }
        loader
            .with_source(JsonFileSource::new(root.join(config.effective_json_path())))
            .with_source(TextFileSource::new(root.join(config.effective_text_path())))
    }

    pub fn with_source(mut self, source: impl PromptSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn load(&self) -> CatalogResult<Catalog> {
        let mut attempts = Vec::new();

        for source in &self.sources {
            match source.fetch().await {
                Ok(prompts) if !prompts.is_empty() => {
                    if !attempts.is_empty() {
                        info!(
                            source = source.name(),
                            skipped = attempts.len(),
                            "Catalog loaded from fallback source"
                        );
                    }
                    info!(
                        source = source.name(),
                        origin = source.origin().as_str(),
                        count = prompts.len(),
                        "Prompt catalog loaded"
                    );
                    return Ok(Catalog {
                        prompts,
                        origin: source.origin(),
                        source: source.name().to_string(),
                    });
                }
                Ok(_) => {
                    warn!(source = source.name(), "Catalog source returned no prompts, falling back");
                    attempts.push(SourceFailure {
                        source: source.name().to_string(),
                        reason: "returned no prompts".to_string(),
                    });
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Catalog source failed, falling back");
                    attempts.push(SourceFailure {
                        source: source.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(CatalogError::AllSourcesFailed { attempts })
    }
}

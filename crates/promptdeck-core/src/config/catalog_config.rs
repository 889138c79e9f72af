//! Prompt catalog configuration.

use serde::{Deserialize, Serialize};

/// `[catalog]` section: the static fallbacks behind the remote source.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Bundled JSON catalog. Default: "data/prompts.json".
    pub json_path: Option<String>,
    /// Bundled plain-text catalog. Default: "data/prompts.txt".
    pub text_path: Option<String>,
}

impl CatalogConfig {
    pub fn effective_json_path(&self) -> &str {
        self.json_path.as_deref().unwrap_or("data/prompts.json")
    }

    pub fn effective_text_path(&self) -> &str {
        self.text_path.as_deref().unwrap_or("data/prompts.txt")
    }
}

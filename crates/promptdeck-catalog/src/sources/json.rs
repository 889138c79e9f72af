//! Bundled JSON catalog: a top-level array of prompts, or `{ "prompts": [...] }`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{CatalogError, CatalogResult};
use crate::types::{CatalogOrigin, Prompt};

use super::{FetchFuture, PromptSource};

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Bare(Vec<Value>),
    Wrapped { prompts: Vec<Value> },
}

/// Parse a JSON catalog document.
///
/// Only the document shape is all-or-nothing. Individual rows that do not
/// decode as a prompt, or whose text is blank, are skipped with a warning.
pub fn parse_json_catalog(source_name: &str, content: &str) -> CatalogResult<Vec<Prompt>> {
    let parsed: JsonCatalog =
        serde_json::from_str(content).map_err(|e| CatalogError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    let rows = match parsed {
        JsonCatalog::Bare(rows) | JsonCatalog::Wrapped { prompts: rows } => rows,
    };

    let total = rows.len();
    let mut kept = Vec::with_capacity(total);
    for (index, row) in rows.into_iter().enumerate() {
        match Prompt::deserialize(row) {
            Ok(prompt) if !prompt.text.trim().is_empty() => kept.push(prompt),
            Ok(prompt) => {
                debug!(source = source_name, id = %prompt.id, "Prompt with empty text skipped");
            }
            Err(e) => {
                debug!(source = source_name, index, error = %e, "Malformed prompt row skipped");
            }
        }
    }
    if kept.len() < total {
        warn!(
            source = source_name,
            dropped = total - kept.len(),
            "Dropped unusable prompt rows"
        );
    }
    Ok(kept)
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl PromptSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> CatalogOrigin {
        CatalogOrigin::Json
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let content = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            parse_json_catalog(&self.name, &content)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let prompts = parse_json_catalog(
            "t",
            r#"[{ "id": "a", "title": "A", "text": "one" }, { "id": 2, "text": "two" }]"#,
        )
        .unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[1].id, "2");
        assert_eq!(prompts[1].title, "");
    }

    #[test]
    fn test_wrapped_object() {
        let prompts = parse_json_catalog(
            "t",
            r#"{ "prompts": [{ "id": "a", "text": "one", "tags": ["x"] }] }"#,
        )
        .unwrap();
        assert_eq!(prompts[0].tags, vec!["x".to_string()]);
    }

    #[test]
    fn test_blank_text_is_dropped() {
        let prompts =
            parse_json_catalog("t", r#"[{ "id": "a", "text": "  " }, { "id": "b", "text": "ok" }]"#)
                .unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].id, "b");
    }

    #[test]
    fn test_malformed_row_does_not_sink_the_catalog() {
        let prompts = parse_json_catalog(
            "t",
            r#"[{ "id": "a", "title": "no text" }, { "id": "b", "text": "ok" }, 42]"#,
        )
        .unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].id, "b");
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let err = parse_json_catalog("prompts.json", r#"{ "items": [] }"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { ref source_name, .. } if source_name == "prompts.json"));
    }
}

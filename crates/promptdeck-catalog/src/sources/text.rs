//! Bundled plain-text catalog.
//!
//! Prompts are separated by blank lines. In a block of several lines the first
//! line is the title and the rest is the prompt text; a single-line block is
//! its own title. A line starting with `## ` sets the category for the prompts
//! that follow it.

use std::path::PathBuf;

use crate::errors::{CatalogError, CatalogResult};
use crate::types::{CatalogOrigin, Prompt};

use super::json::display_name;
use super::{FetchFuture, PromptSource};

const MAX_DERIVED_TITLE_CHARS: usize = 60;

pub fn parse_text_catalog(content: &str) -> Vec<Prompt> {
    let mut prompts = Vec::new();
    let mut category: Option<String> = None;
    let mut block: Vec<&str> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix("## ") {
            flush(&mut block, category.as_deref(), &mut prompts);
            let header = header.trim();
            category = (!header.is_empty()).then(|| header.to_string());
        } else if line.is_empty() {
            flush(&mut block, category.as_deref(), &mut prompts);
        } else {
            block.push(line);
        }
    }
    flush(&mut block, category.as_deref(), &mut prompts);
    prompts
}

fn flush(block: &mut Vec<&str>, category: Option<&str>, prompts: &mut Vec<Prompt>) {
    if block.is_empty() {
        return;
    }
    let (title, text) = if block.len() == 1 {
        (derive_title(block[0]), block[0].to_string())
    } else {
        (block[0].to_string(), block[1..].join("\n"))
    };
    let mut prompt = Prompt::new(format!("text-{}", prompts.len() + 1), title, text);
    prompt.category = category.map(str::to_string);
    prompts.push(prompt);
    block.clear();
}

fn derive_title(text: &str) -> String {
    if text.chars().count() <= MAX_DERIVED_TITLE_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_DERIVED_TITLE_CHARS).collect();
    format!("{}…", cut.trim_end())
}

#[derive(Debug, Clone)]
pub struct TextFileSource {
    path: PathBuf,
    name: String,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

impl PromptSource for TextFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self) -> CatalogOrigin {
        CatalogOrigin::Text
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let content = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            Ok(parse_text_catalog(&content))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_titles_and_ids() {
        let prompts = parse_text_catalog(
            "Slow dolly\nCamera pushes in slowly\non the subject\n\n\nNeon rain at night\n",
        );
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].id, "text-1");
        assert_eq!(prompts[0].title, "Slow dolly");
        assert_eq!(prompts[0].text, "Camera pushes in slowly\non the subject");
        assert_eq!(prompts[1].id, "text-2");
        assert_eq!(prompts[1].title, "Neon rain at night");
        assert_eq!(prompts[1].text, "Neon rain at night");
    }

    #[test]
    fn test_category_headers() {
        let prompts = parse_text_catalog("## Camera\nDolly in\n\n## Lighting\nGolden hour\nWarm backlight\n");
        assert_eq!(prompts[0].category.as_deref(), Some("Camera"));
        assert_eq!(prompts[1].category.as_deref(), Some("Lighting"));
        assert_eq!(prompts[1].title, "Golden hour");
    }

    #[test]
    fn test_long_single_line_title_is_truncated() {
        let line = "a".repeat(100);
        let prompts = parse_text_catalog(&line);
        assert_eq!(prompts[0].title.chars().count(), MAX_DERIVED_TITLE_CHARS + 1);
        assert_eq!(prompts[0].text, line);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_text_catalog("\n\n  \n").is_empty());
    }
}

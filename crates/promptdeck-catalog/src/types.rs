//! Catalog data model.

use serde::{Deserialize, Deserializer, Serialize};

/// One prompt as shown in the popup and side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Remote rows use numeric ids; both forms are accepted.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(alias = "prompt", alias = "content")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Prompt {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
            category: None,
            tags: Vec::new(),
        }
    }

    /// Case-insensitive match on title, text and tags.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.text.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Which kind of source a catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    Remote,
    Json,
    Text,
    Bundled,
}

impl CatalogOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Json => "json",
            Self::Text => "text",
            Self::Bundled => "bundled",
        }
    }
}

/// A loaded catalog and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub prompts: Vec<Prompt>,
    pub origin: CatalogOrigin,
    /// Name of the source that produced it.
    pub source: String,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.prompts.iter().filter_map(|p| p.category.as_deref()) {
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Prompt> + 'a {
        self.prompts.iter().filter(move |p| p.matches(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_and_prompt_alias() {
        let p: Prompt =
            serde_json::from_str(r#"{ "id": 7, "title": "Dolly", "prompt": "slow dolly in" }"#)
                .unwrap();
        assert_eq!(p.id, "7");
        assert_eq!(p.text, "slow dolly in");
        assert!(p.tags.is_empty());
    }

    #[test]
    fn test_matches_tags_case_insensitively() {
        let mut p = Prompt::new("1", "Sunset", "golden hour over the sea");
        p.tags = vec!["Cinematic".into()];
        assert!(p.matches("cinematic"));
        assert!(p.matches("GOLDEN"));
        assert!(!p.matches("neon"));
        assert!(p.matches("  "));
    }

    #[test]
    fn test_categories_first_seen_order() {
        let mut a = Prompt::new("1", "a", "a");
        a.category = Some("camera".into());
        let mut b = Prompt::new("2", "b", "b");
        b.category = Some("lighting".into());
        let mut c = Prompt::new("3", "c", "c");
        c.category = Some("camera".into());
        let catalog = Catalog {
            prompts: vec![a, b, c],
            origin: CatalogOrigin::Json,
            source: "test".into(),
        };
        assert_eq!(catalog.categories(), vec!["camera", "lighting"]);
        assert_eq!(catalog.get("2").unwrap().title, "b");
    }
}

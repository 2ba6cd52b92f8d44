//! Content units as supplied by a document source.
//!
//! A unit is one source document: its structured frontmatter plus the
//! opaque body that follows it.

use serde::{Deserialize, Deserializer, Serialize};

/// Editorial category of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Long-form analysis
    Analysis,

    /// News item
    News,

    /// How-to guide
    Guide,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 3] = [Category::Analysis, Category::News, Category::Guide];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Analysis => "analysis",
            Category::News => "news",
            Category::Guide => "guide",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "analysis" => Ok(Category::Analysis),
            "news" => Ok(Category::News),
            "guide" => Ok(Category::Guide),
            _ => anyhow::bail!("Unknown category: {}", s),
        }
    }
}

/// Structured metadata attached to a content unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    /// Post title
    pub title: String,

    /// Explicit slug, takes precedence over the one derived from the source key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Short summary
    #[serde(default)]
    pub description: String,

    /// Publication date as written; parsed by the index builder. Missing or
    /// non-scalar values become `""` and surface as a malformed date.
    #[serde(default, deserialize_with = "scalar_string")]
    pub published_at: String,

    /// Author id, resolved against the author directory
    pub author: String,

    pub category: Category,

    /// Free-form tags in authored order (duplicates allowed)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Estimated reading time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
}

impl Frontmatter {
    /// Create frontmatter with the required fields; everything else empty
    pub fn new(
        title: impl Into<String>,
        published_at: impl Into<String>,
        author: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            title: title.into(),
            slug: None,
            description: String::new(),
            published_at: published_at.into(),
            author: author.into(),
            category,
            tags: Vec::new(),
            image: None,
            read_time: None,
        }
    }

    /// Set the stated slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set the cover image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the reading time
    pub fn with_read_time(mut self, minutes: u32) -> Self {
        self.read_time = Some(minutes);
        self
    }

    /// Whether `tag` appears in the tag list (exact, case-sensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Accept any YAML scalar as text; null and collections become empty
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => s,
        Some(serde_yaml::Value::Number(n)) => n.to_string(),
        Some(serde_yaml::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Opaque renderable body of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Body(String);

impl Body {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Body {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for Body {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// One source document keyed by its path-like source key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUnit {
    /// Hierarchical key unique within a source (e.g. `posts/2024-01-01-alpha.mdx`)
    pub source_key: String,

    pub frontmatter: Frontmatter,

    pub body: Body,
}

impl ContentUnit {
    /// Create a new content unit
    pub fn new(source_key: impl Into<String>, frontmatter: Frontmatter, body: impl Into<Body>) -> Self {
        Self {
            source_key: source_key.into(),
            frontmatter,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("analysis".parse::<Category>().unwrap(), Category::Analysis);
        assert_eq!("News".parse::<Category>().unwrap(), Category::News);
        assert_eq!(" guide ".parse::<Category>().unwrap(), Category::Guide);
        assert!("review".parse::<Category>().is_err());
    }

    #[test]
    fn test_frontmatter_yaml_field_names() {
        let yaml = r#"
title: Patch notes breakdown
description: What changed
publishedAt: "2024-06-01"
author: jdoe
category: analysis
tags: [meta, patch, meta]
readTime: 7
"#;
        let fm: Frontmatter = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(fm.title, "Patch notes breakdown");
        assert_eq!(fm.published_at, "2024-06-01");
        assert_eq!(fm.category, Category::Analysis);
        assert_eq!(fm.tags, vec!["meta", "patch", "meta"]);
        assert_eq!(fm.read_time, Some(7));
        assert!(fm.slug.is_none());
        assert!(fm.image.is_none());
    }

    #[test]
    fn test_missing_published_at_is_empty() {
        let yaml = "title: x\nauthor: a\ncategory: news\n";
        let fm: Frontmatter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fm.published_at, "");

        let yaml = "title: x\npublishedAt:\nauthor: a\ncategory: news\n";
        let fm: Frontmatter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fm.published_at, "");
    }

    #[test]
    fn test_non_string_published_at_is_kept_as_text() {
        let yaml = "title: x\npublishedAt: 20240601\nauthor: a\ncategory: news\n";
        let fm: Frontmatter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fm.published_at, "20240601");

        let yaml = "title: x\npublishedAt: [2024, 6, 1]\nauthor: a\ncategory: news\n";
        let fm: Frontmatter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fm.published_at, "");
    }

    #[test]
    fn test_frontmatter_rejects_unknown_category() {
        let yaml = "title: x\npublishedAt: '2024-01-01'\nauthor: a\ncategory: review\n";
        assert!(serde_yaml::from_str::<Frontmatter>(yaml).is_err());
    }

    #[test]
    fn test_has_tag_is_case_sensitive() {
        let fm = Frontmatter::new("t", "2024-01-01", "a", Category::News).with_tags(["Rust"]);
        assert!(fm.has_tag("Rust"));
        assert!(!fm.has_tag("rust"));
    }
}

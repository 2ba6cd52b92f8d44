//! The built catalog.
//!
//! An immutable, newest-first sequence of entries with a slug index.
//! Produced by [`build_catalog`](super::builder::build_catalog); never
//! mutated afterwards.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::{Body, Category, Frontmatter};

/// Catalog of all indexed content
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    /// Catalog format version
    pub version: u32,

    /// When this catalog was built; not serialized, so identical input
    /// serializes identically
    #[serde(skip)]
    pub built_at: DateTime<Utc>,

    entries: Vec<CatalogEntry>,

    #[serde(skip)]
    by_slug: HashMap<String, usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: 1,
            built_at: Utc::now(),
            entries: Vec::new(),
            by_slug: HashMap::new(),
        }
    }

    /// Wrap entries that are already ordered and slug-unique
    pub(crate) fn from_ordered(entries: Vec<CatalogEntry>) -> Self {
        let by_slug = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.slug.clone(), pos))
            .collect();

        Self {
            entries,
            by_slug,
            ..Self::new()
        }
    }

    /// Entries in stored order (newest first)
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Get an entry by slug
    pub fn get(&self, slug: &str) -> Option<&CatalogEntry> {
        self.by_slug.get(slug).map(|&pos| &self.entries[pos])
    }

    /// Slugs with last-modified times, in catalog order
    pub fn sitemap_entries(&self) -> impl Iterator<Item = (&str, Option<DateTime<Utc>>)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.slug.as_str(), entry.published))
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single entry in the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Unique canonical identifier
    pub slug: String,

    /// Key of the unit this entry was built from
    pub source_key: String,

    pub frontmatter: Frontmatter,

    #[serde(skip)]
    pub body: Body,

    /// Parsed `publishedAt`; `None` when malformed
    pub published: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn category(&self) -> Category {
        self.frontmatter.category
    }

    pub fn tags(&self) -> &[String] {
        &self.frontmatter.tags
    }

    /// Author id (back-reference into the author directory)
    pub fn author_id(&self) -> &str {
        &self.frontmatter.author
    }
}

/// Parse a `publishedAt` value.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DD[T ]HH:MM:SS` (taken as UTC), or a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_published(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

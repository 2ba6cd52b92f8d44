//! Catalog query engine.
//!
//! Read-only lookups against one catalog snapshot. Filters preserve the
//! catalog's newest-first order.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{AuthorDirectory, AuthorProfile, Category};

use super::catalog::{Catalog, CatalogEntry};

/// Queries over a fixed catalog and author directory
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    catalog: Arc<Catalog>,
    authors: Arc<AuthorDirectory>,
}

impl CatalogQuery {
    pub fn new(catalog: Arc<Catalog>, authors: Arc<AuthorDirectory>) -> Self {
        Self { catalog, authors }
    }

    /// The snapshot this engine answers from
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// All entries, newest first. The iterator is `Clone`, so it can be
    /// restarted.
    pub fn list_all(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.catalog.entries().iter()
    }

    /// Exact slug lookup
    pub fn get_by_slug(&self, slug: &str) -> Option<&CatalogEntry> {
        self.catalog.get(slug)
    }

    pub fn list_by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &CatalogEntry> + Clone + '_ {
        self.list_all()
            .filter(move |entry| entry.category() == category)
    }

    /// Like [`list_by_category`](Self::list_by_category), but unknown names
    /// give an empty result instead of an error
    pub fn list_by_category_name(&self, name: &str) -> Vec<&CatalogEntry> {
        match name.parse::<Category>() {
            Ok(category) => self.list_by_category(category).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Entries carrying `tag` (exact, case-sensitive)
    pub fn list_by_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + Clone + 'a {
        self.list_all()
            .filter(move |entry| entry.frontmatter.has_tag(tag))
    }

    /// Every tag used in the catalog, sorted and unique
    pub fn list_all_tags(&self) -> Vec<String> {
        self.list_all()
            .flat_map(|entry| entry.tags().iter())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn get_author(&self, author_id: &str) -> Option<&AuthorProfile> {
        self.authors.get(author_id)
    }

    /// Profile of the entry's author, if known
    pub fn author_of(&self, entry: &CatalogEntry) -> Option<&AuthorProfile> {
        self.get_author(entry.author_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorProfile, Frontmatter};
    use crate::ingest::MemorySource;
    use crate::library::build_catalog;

    fn query() -> CatalogQuery {
        let source = MemorySource::new()
            .with_unit(
                "posts/2024-01-01-alpha.md",
                Frontmatter::new("Alpha", "2024-01-01", "jdoe", Category::Guide)
                    .with_tags(["decks", "beginner"]),
                "",
            )
            .with_unit(
                "posts/2024-06-01-beta.md",
                Frontmatter::new("Beta", "2024-06-01", "ghost", Category::News)
                    .with_tags(["meta", "decks", "meta"]),
                "",
            )
            .with_unit(
                "posts/2024-03-01-gamma.md",
                Frontmatter::new("Gamma", "2024-03-01", "jdoe", Category::Guide).with_tags(["Decks"]),
                "",
            );

        let catalog = build_catalog(&source).unwrap().catalog;
        let authors = AuthorDirectory::new().with_author(
            "jdoe",
            AuthorProfile {
                name: "Jane Doe".to_string(),
                role: "Editor".to_string(),
                avatar: "/a.png".to_string(),
                bio: "".to_string(),
                twitter_handle: None,
            },
        );
        CatalogQuery::new(Arc::new(catalog), Arc::new(authors))
    }

    fn slugs<'a>(entries: impl Iterator<Item = &'a CatalogEntry>) -> Vec<&'a str> {
        entries.map(|e| e.slug.as_str()).collect()
    }

    #[test]
    fn test_list_all_is_restartable() {
        let q = query();
        let iter = q.list_all();
        assert_eq!(slugs(iter.clone()), vec!["beta", "gamma", "alpha"]);
        assert_eq!(slugs(iter), vec!["beta", "gamma", "alpha"]);
    }

    #[test]
    fn test_list_by_category() {
        let q = query();
        assert_eq!(slugs(q.list_by_category(Category::Guide)), vec!["gamma", "alpha"]);
        assert!(q.list_by_category(Category::Analysis).next().is_none());
    }

    #[test]
    fn test_list_by_category_name_unknown_is_empty() {
        let q = query();
        assert_eq!(q.list_by_category_name("news").len(), 1);
        assert!(q.list_by_category_name("reviews").is_empty());
    }

    #[test]
    fn test_list_by_tag_is_case_sensitive() {
        let q = query();
        assert_eq!(slugs(q.list_by_tag("decks")), vec!["beta", "alpha"]);
        assert_eq!(slugs(q.list_by_tag("Decks")), vec!["gamma"]);
        assert!(q.list_by_tag("nonexistent-tag").next().is_none());
    }

    #[test]
    fn test_list_all_tags_sorted_unique() {
        let q = query();
        assert_eq!(q.list_all_tags(), vec!["Decks", "beginner", "decks", "meta"]);
    }

    #[test]
    fn test_author_lookup() {
        let q = query();
        let beta = q.get_by_slug("beta").unwrap();
        let alpha = q.get_by_slug("alpha").unwrap();

        assert!(q.author_of(beta).is_none());
        assert_eq!(q.author_of(alpha).unwrap().name, "Jane Doe");
        assert!(q.get_author("nobody").is_none());
    }
}

//! Current-catalog holder.
//!
//! A rebuild publishes a whole new catalog with one atomic swap; readers
//! holding an older snapshot keep using it untouched.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::domain::AuthorDirectory;

use super::catalog::Catalog;
use super::query::CatalogQuery;

pub struct CatalogStore {
    current: ArcSwap<Catalog>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Catalog::new())
    }
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: ArcSwap::from_pointee(catalog),
        }
    }

    /// Snapshot of the current catalog
    pub fn current(&self) -> Arc<Catalog> {
        self.current.load_full()
    }

    /// Publish `catalog`, returning the snapshot it replaced
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let entries = catalog.len();
        let previous = self.current.swap(Arc::new(catalog));
        info!(entries, previous = previous.len(), "Catalog replaced");
        previous
    }

    /// Query engine bound to the current snapshot
    pub fn query(&self, authors: Arc<AuthorDirectory>) -> CatalogQuery {
        CatalogQuery::new(self.current(), authors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Frontmatter};
    use crate::ingest::MemorySource;
    use crate::library::build_catalog;

    #[test]
    fn test_old_snapshot_survives_replace() {
        let first = MemorySource::new().with_unit(
            "posts/a.md",
            Frontmatter::new("A", "2024-01-01", "jdoe", Category::News),
            "",
        );
        let store = CatalogStore::new(build_catalog(&first).unwrap().catalog);
        let authors = Arc::new(AuthorDirectory::new());

        let before = store.query(authors.clone());

        let second = first.with_unit(
            "posts/b.md",
            Frontmatter::new("B", "2024-02-01", "jdoe", Category::News),
            "",
        );
        let previous = store.replace(build_catalog(&second).unwrap().catalog);

        assert_eq!(previous.len(), 1);
        assert_eq!(before.list_all().count(), 1);
        assert!(before.get_by_slug("b").is_none());

        let after = store.query(authors);
        assert_eq!(after.list_all().count(), 2);
        assert!(after.get_by_slug("b").is_some());
    }
}

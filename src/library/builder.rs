//! Content index builder.
//!
//! Turns a document source into an immutable [`Catalog`]: derives slugs,
//! drops slug collisions (first unit in source order wins), parses dates and
//! sorts newest first. Data-quality problems become [`Diagnostic`]s; only a
//! broken source fails the build.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, info, instrument};

use super::catalog::{parse_published, Catalog, CatalogEntry};
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::slug::derive_slug;
use crate::ingest::{DocumentSource, SourceError};

/// Hard failures of a catalog build
#[derive(Debug, Error)]
pub enum BuildError {
    /// The document source broke its contract
    #[error("Document source error: {0}")]
    Source(#[from] SourceError),

    /// Raised by [`CatalogBuild::into_strict`] only
    #[error("Catalog build produced {} diagnostic(s)", .0.len())]
    Diagnostics(Vec<Diagnostic>),
}

/// Result of one build: the catalog plus everything worth warning about
#[derive(Debug, Clone)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub diagnostics: Vec<Diagnostic>,
}

impl CatalogBuild {
    /// Lenient: take both halves
    pub fn into_parts(self) -> (Catalog, Vec<Diagnostic>) {
        (self.catalog, self.diagnostics)
    }

    /// Strict: any diagnostic fails the build
    pub fn into_strict(self) -> Result<Catalog, BuildError> {
        if self.diagnostics.is_empty() {
            Ok(self.catalog)
        } else {
            Err(BuildError::Diagnostics(self.diagnostics))
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics of collided units
    pub fn collisions(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_collision())
    }
}

/// Build a catalog from `source`.
///
/// Pure given the source's units: the same input always yields the same
/// entries in the same order.
#[instrument(skip(source))]
pub fn build_catalog<S>(source: &S) -> Result<CatalogBuild, BuildError>
where
    S: DocumentSource + ?Sized,
{
    let units = source.units()?;

    let mut seen_keys: HashSet<&str> = HashSet::with_capacity(units.len());
    for unit in &units {
        if !seen_keys.insert(unit.source_key.as_str()) {
            return Err(SourceError::DuplicateKey(unit.source_key.clone()).into());
        }
    }

    let mut diagnostics = Vec::new();
    let mut owners: HashMap<String, String> = HashMap::with_capacity(units.len());
    let mut entries = Vec::with_capacity(units.len());

    for unit in units {
        let derived = derive_slug(unit.frontmatter.slug.as_deref(), &unit.source_key);

        if let Some(kept) = owners.get(derived.as_str()) {
            diagnostics.push(Diagnostic::new(
                unit.source_key.clone(),
                DiagnosticKind::SlugCollision {
                    slug: derived.as_str().to_string(),
                    kept_source_key: kept.clone(),
                },
            ));
            continue;
        }

        if derived.is_placeholder() {
            diagnostics.push(Diagnostic::new(
                unit.source_key.clone(),
                DiagnosticKind::EmptySlug {
                    placeholder: derived.as_str().to_string(),
                },
            ));
        }

        let published = parse_published(&unit.frontmatter.published_at);
        if published.is_none() {
            diagnostics.push(Diagnostic::new(
                unit.source_key.clone(),
                DiagnosticKind::MalformedDate {
                    value: unit.frontmatter.published_at.clone(),
                },
            ));
        }

        let slug = derived.into_string();
        owners.insert(slug.clone(), unit.source_key.clone());
        entries.push(CatalogEntry {
            slug,
            source_key: unit.source_key,
            frontmatter: unit.frontmatter,
            body: unit.body,
            published,
        });
    }

    // Stable: equal dates keep source order, undated entries go last
    entries.sort_by(|a, b| match (a.published, b.published) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    for diagnostic in &diagnostics {
        debug!("{}", diagnostic);
    }
    info!(
        entries = entries.len(),
        diagnostics = diagnostics.len(),
        "Catalog built"
    );

    Ok(CatalogBuild {
        catalog: Catalog::from_ordered(entries),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ContentUnit, Frontmatter};
    use crate::ingest::MemorySource;

    fn fm(date: &str) -> Frontmatter {
        Frontmatter::new("t", date, "jdoe", Category::News)
    }

    #[test]
    fn test_build_empty_source() {
        let build = build_catalog(&MemorySource::new()).unwrap();
        assert!(build.catalog.is_empty());
        assert!(build.is_clean());
    }

    #[test]
    fn test_equal_dates_keep_source_order() {
        let source = MemorySource::new()
            .with_unit("posts/one.md", fm("2024-03-01"), "")
            .with_unit("posts/two.md", fm("2024-03-01"), "")
            .with_unit("posts/three.md", fm("2024-03-01"), "");

        let build = build_catalog(&source).unwrap();
        let slugs: Vec<_> = build.catalog.entries().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_duplicate_source_key_is_contract_violation() {
        let units = vec![
            ContentUnit::new("posts/a.md", fm("2024-01-01"), ""),
            ContentUnit::new("posts/a.md", fm("2024-02-01"), ""),
        ];

        let err = build_catalog(&units).unwrap_err();
        assert!(matches!(err, BuildError::Source(SourceError::DuplicateKey(ref k)) if k == "posts/a.md"));
    }

    #[test]
    fn test_placeholder_slug_is_flagged_but_kept() {
        let source = MemorySource::new().with_unit("posts/2024-01-01-.md", fm("2024-01-01"), "");

        let build = build_catalog(&source).unwrap();
        assert_eq!(build.catalog.len(), 1);
        assert!(build.catalog.entries()[0].slug.starts_with("untitled-"));
        assert!(matches!(
            build.diagnostics[0].kind,
            DiagnosticKind::EmptySlug { .. }
        ));
    }

    #[test]
    fn test_collided_unit_gets_no_date_diagnostic() {
        let source = MemorySource::new()
            .with_unit("posts/a.md", fm("2024-01-01").with_slug("dup"), "")
            .with_unit("posts/b.md", fm("garbage").with_slug("dup"), "");

        let build = build_catalog(&source).unwrap();
        assert_eq!(build.diagnostics.len(), 1);
        assert!(build.diagnostics[0].is_collision());
    }

    #[test]
    fn test_into_strict() {
        let clean = MemorySource::new().with_unit("posts/a.md", fm("2024-01-01"), "");
        assert!(build_catalog(&clean).unwrap().into_strict().is_ok());

        let dirty = MemorySource::new().with_unit("posts/a.md", fm("soon"), "");
        let err = build_catalog(&dirty).unwrap().into_strict().unwrap_err();
        assert!(matches!(err, BuildError::Diagnostics(ref d) if d.len() == 1));
    }
}

//! gazette - Content index and catalog query engine
//!
//! Turns a set of frontmatter documents into an immutable, newest-first
//! catalog and answers lookups against it.
//!
//! # Architecture
//!
//! The catalog is a derived view, never edited in place:
//! - A document source supplies units in a fixed order
//! - The index builder derives slugs, drops collisions and sorts by date
//! - Data-quality problems come back as diagnostics, not errors
//! - A rebuild replaces the whole catalog with one atomic swap
//!
//! # Modules
//!
//! - `domain`: Input data structures (ContentUnit, Frontmatter, AuthorDirectory)
//! - `ingest`: Document sources (in-memory, directory)
//! - `library`: Index builder, catalog, query engine, store
//! - `sitemap`: XML sitemap over the catalog
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Build and report diagnostics
//! gazette build --strict
//!
//! # Newest guides tagged "decks"
//! gazette list --category guide --tag decks
//!
//! # One entry
//! gazette show <slug>
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod ingest;
pub mod library;
pub mod sitemap;

// Re-export main types at crate root for convenience
pub use domain::{AuthorDirectory, AuthorProfile, Body, Category, ContentUnit, Frontmatter};
pub use ingest::{DirectorySource, DocumentSource, MemorySource, SourceError};
pub use library::{
    build_catalog, BuildError, Catalog, CatalogBuild, CatalogEntry, CatalogQuery, CatalogStore,
    Diagnostic, DiagnosticKind,
};
pub use sitemap::SitemapGenerator;

//! Content index and catalog queries.
//!
//! # Flow
//!
//! ```text
//! DocumentSource ──build_catalog──▶ CatalogBuild { catalog, diagnostics }
//!                                        │
//!                                        ▼
//!                            CatalogStore (atomic swap)
//!                                        │
//!                                        ▼
//!                          CatalogQuery + AuthorDirectory
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostics;
pub mod query;
pub mod slug;
pub mod store;

pub use builder::{build_catalog, BuildError, CatalogBuild};
pub use catalog::{parse_published, Catalog, CatalogEntry};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use query::CatalogQuery;
pub use slug::{derive_slug, DerivedSlug};
pub use store::CatalogStore;

//! Document sources feeding the index builder.
//!
//! - `source`: the [`DocumentSource`] contract and an in-memory mapping
//! - `directory`: eager discovery of frontmatter documents on disk

pub mod directory;
pub mod source;

pub use directory::{parse_document, DirectorySource, SkippedFile, DEFAULT_PATTERNS};
pub use source::{DocumentSource, MemorySource, SourceError};

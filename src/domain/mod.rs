//! Domain types for gazette.
//!
//! This module contains the input data structures:
//! - Content: units, frontmatter and bodies supplied by a document source
//! - Author: the read-only author directory

pub mod author;
pub mod content;

// Re-export commonly used types
pub use author::{AuthorDirectory, AuthorError, AuthorProfile};
pub use content::{Body, Category, ContentUnit, Frontmatter};

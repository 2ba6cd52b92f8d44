//! Document sources.
//!
//! A source hands the index builder a finite, ordered mapping of
//! `source_key → ContentUnit`. Its iteration order decides sort tie-breaks
//! and which unit wins a slug collision.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::{Body, ContentUnit, Frontmatter};

/// Contract violations by a document source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Document source unavailable: {0}")]
    Unavailable(String),

    #[error("Duplicate source key: {0}")]
    DuplicateKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supplies content units in a deterministic order
pub trait DocumentSource {
    /// Resolve every unit, in iteration order
    fn units(&self) -> Result<Vec<ContentUnit>, SourceError>;
}

impl DocumentSource for [ContentUnit] {
    fn units(&self) -> Result<Vec<ContentUnit>, SourceError> {
        Ok(self.to_vec())
    }
}

impl DocumentSource for Vec<ContentUnit> {
    fn units(&self) -> Result<Vec<ContentUnit>, SourceError> {
        Ok(self.clone())
    }
}

/// In-memory source with insertion-ordered, unique keys
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    units: Vec<ContentUnit>,
    positions: HashMap<String, usize>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit; an existing key is replaced in place, keeping its position
    pub fn insert(&mut self, unit: ContentUnit) -> Option<ContentUnit> {
        match self.positions.get(&unit.source_key) {
            Some(&pos) => Some(std::mem::replace(&mut self.units[pos], unit)),
            None => {
                self.positions.insert(unit.source_key.clone(), self.units.len());
                self.units.push(unit);
                None
            }
        }
    }

    /// Insert a unit (builder style)
    pub fn with_unit(
        mut self,
        source_key: impl Into<String>,
        frontmatter: Frontmatter,
        body: impl Into<Body>,
    ) -> Self {
        self.insert(ContentUnit::new(source_key, frontmatter, body));
        self
    }

    pub fn get(&self, source_key: &str) -> Option<&ContentUnit> {
        self.positions.get(source_key).map(|&pos| &self.units[pos])
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<ContentUnit> for MemorySource {
    fn from_iter<I: IntoIterator<Item = ContentUnit>>(iter: I) -> Self {
        let mut source = Self::new();
        for unit in iter {
            source.insert(unit);
        }
        source
    }
}

impl DocumentSource for MemorySource {
    fn units(&self) -> Result<Vec<ContentUnit>, SourceError> {
        Ok(self.units.clone())
    }
}

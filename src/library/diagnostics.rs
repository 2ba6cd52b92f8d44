//! Non-fatal data-quality findings collected during a catalog build.

use serde::{Deserialize, Serialize};

/// What went wrong with a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `publishedAt` did not parse; entry sorted to the tail
    MalformedDate { value: String },

    /// No slug could be derived; entry kept under a placeholder
    EmptySlug { placeholder: String },

    /// Slug already taken by an earlier unit; this unit was excluded
    SlugCollision { slug: String, kept_source_key: String },
}

/// A finding tied to the unit that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub source_key: String,

    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(source_key: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            source_key: source_key.into(),
            kind,
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(self.kind, DiagnosticKind::SlugCollision { .. })
    }

    pub fn is_malformed_date(&self) -> bool {
        matches!(self.kind, DiagnosticKind::MalformedDate { .. })
    }

    /// Whether the unit is absent from the catalog because of this finding
    pub fn excludes_entry(&self) -> bool {
        self.is_collision()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::MalformedDate { value } => {
                write!(f, "{}: malformed publishedAt {:?}", self.source_key, value)
            }
            DiagnosticKind::EmptySlug { placeholder } => {
                write!(f, "{}: empty slug, using {}", self.source_key, placeholder)
            }
            DiagnosticKind::SlugCollision {
                slug,
                kept_source_key,
            } => write!(
                f,
                "{}: slug {:?} already used by {}, excluded",
                self.source_key, slug, kept_source_key
            ),
        }
    }
}

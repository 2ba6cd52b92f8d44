//! Slug derivation.
//!
//! Precedence: stated slug, then the source key's file name with the
//! extension and a `YYYY-MM-DD-` prefix removed, then a placeholder.

use sha2::{Digest, Sha256};

/// Result of deriving a slug for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedSlug {
    /// Taken verbatim from the frontmatter
    Stated(String),

    /// Derived from the source key
    FromKey(String),

    /// Nothing usable; placeholder generated from the source key
    Placeholder(String),
}

impl DerivedSlug {
    pub fn as_str(&self) -> &str {
        match self {
            DerivedSlug::Stated(s) | DerivedSlug::FromKey(s) | DerivedSlug::Placeholder(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            DerivedSlug::Stated(s) | DerivedSlug::FromKey(s) | DerivedSlug::Placeholder(s) => s,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, DerivedSlug::Placeholder(_))
    }
}

/// Derive the slug for a unit.
///
/// A whitespace-only stated slug counts as absent; any other stated slug is
/// used verbatim, surrounding whitespace included.
pub fn derive_slug(stated: Option<&str>, source_key: &str) -> DerivedSlug {
    if let Some(stated) = stated {
        if !stated.trim().is_empty() {
            return DerivedSlug::Stated(stated.to_string());
        }
    }

    let from_key = slug_from_key(source_key);
    if from_key.is_empty() {
        DerivedSlug::Placeholder(placeholder_slug(source_key))
    } else {
        DerivedSlug::FromKey(from_key.to_string())
    }
}

/// Final path segment without its extension or leading date prefix
pub fn slug_from_key(source_key: &str) -> &str {
    let name = source_key
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_key);

    let stem = match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => name,
    };

    strip_date_prefix(stem)
}

/// Strip a leading `YYYY-MM-DD-` if present
fn strip_date_prefix(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    if bytes.len() < 11 {
        return stem;
    }

    let shape_ok = bytes[..11].iter().enumerate().all(|(i, b)| match i {
        4 | 7 | 10 => *b == b'-',
        _ => b.is_ascii_digit(),
    });

    if shape_ok {
        &stem[11..]
    } else {
        stem
    }
}

/// `untitled-<sha256(source_key)[0:8] hex>`
pub fn placeholder_slug(source_key: &str) -> String {
    let digest = Sha256::digest(source_key.as_bytes());
    format!("untitled-{}", hex::encode(&digest[..8]))
}

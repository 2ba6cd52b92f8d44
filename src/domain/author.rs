//! Author directory.
//!
//! A read-only id → profile mapping, loaded once and handed to the query
//! engine explicitly.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading an author directory
#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid author directory: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Public profile of an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    pub name: String,

    pub role: String,

    /// Avatar image URL
    pub avatar: String,

    pub bio: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
}

/// Read-only mapping from author id to profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorDirectory {
    authors: BTreeMap<String, AuthorProfile>,
}

impl AuthorDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile (builder style, for setup code and tests)
    pub fn with_author(mut self, id: impl Into<String>, profile: AuthorProfile) -> Self {
        self.authors.insert(id.into(), profile);
        self
    }

    /// Parse a YAML mapping of `id: profile`
    pub fn from_yaml_str(content: &str) -> Result<Self, AuthorError> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the directory from a YAML file
    pub async fn load(path: &Path) -> Result<Self, AuthorError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AuthorError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_yaml_str(&content)
    }

    /// Look up a profile; unknown ids are not an error
    pub fn get(&self, id: &str) -> Option<&AuthorProfile> {
        self.authors.get(id)
    }

    /// Iterate `(id, profile)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorProfile)> {
        self.authors.iter().map(|(id, p)| (id.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
jdoe:
  name: Jane Doe
  role: Editor
  avatar: /avatars/jdoe.png
  bio: Covers the competitive scene.
  twitterHandle: janedoe
rsmith:
  name: Rob Smith
  role: Writer
  avatar: /avatars/rsmith.png
  bio: Deck guides.
"#;
        let dir = AuthorDirectory::from_yaml_str(yaml).unwrap();

        assert_eq!(dir.len(), 2);
        let jane = dir.get("jdoe").unwrap();
        assert_eq!(jane.name, "Jane Doe");
        assert_eq!(jane.twitter_handle.as_deref(), Some("janedoe"));
        assert!(dir.get("rsmith").unwrap().twitter_handle.is_none());
    }

    #[test]
    fn test_unknown_author_is_none() {
        let dir = AuthorDirectory::new();
        assert!(dir.get("ghost").is_none());
    }

    #[test]
    fn test_empty_yaml_is_empty_directory() {
        let dir = AuthorDirectory::from_yaml_str("  \n").unwrap();
        assert!(dir.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = AuthorDirectory::from_yaml_str("jdoe: 42").unwrap_err();
        assert!(matches!(err, AuthorError::Parse(_)));
    }
}

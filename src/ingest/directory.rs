//! Filesystem document source.
//!
//! Discovers markdown/MDX files under a content root, splits the YAML
//! frontmatter from the body, and resolves everything up front so the
//! index build itself does no I/O.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

use super::source::{DocumentSource, SourceError};
use crate::domain::{Body, ContentUnit, Frontmatter};

/// Default discovery patterns, relative to the content root
pub const DEFAULT_PATTERNS: [&str; 2] = ["**/*.md", "**/*.mdx"];

/// A file that was found but could not be turned into a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub source_key: String,
    pub reason: String,
}

/// Content units loaded eagerly from a directory tree
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    units: Vec<ContentUnit>,
    skipped: Vec<SkippedFile>,
}

impl DirectorySource {
    /// Load every file under `root` matching any of `patterns`.
    ///
    /// Keys are root-relative paths with `/` separators, iterated in
    /// lexicographic order.
    pub async fn load(root: &Path, patterns: &[String]) -> Result<Self, SourceError> {
        if !root.is_dir() {
            return Err(SourceError::Unavailable(format!(
                "content directory does not exist: {}",
                root.display()
            )));
        }

        let files = discover(root, patterns)?;

        let mut units = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();

        for (source_key, path) in files {
            let parsed = match fs::read_to_string(&path).await {
                Ok(raw) => parse_document(&raw),
                Err(e) => Err(format!("unreadable file: {}", e)),
            };

            match parsed {
                Ok((frontmatter, body)) => {
                    debug!("Loaded {}", source_key);
                    units.push(ContentUnit::new(source_key, frontmatter, body));
                }
                Err(reason) => {
                    warn!("Skipping {}: {}", source_key, reason);
                    skipped.push(SkippedFile { source_key, reason });
                }
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            units,
            skipped,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files that were discovered but not loaded
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl DocumentSource for DirectorySource {
    fn units(&self) -> Result<Vec<ContentUnit>, SourceError> {
        Ok(self.units.clone())
    }
}

/// Match patterns under `root`; returns `source_key → path` sorted by key
fn discover(root: &Path, patterns: &[String]) -> Result<BTreeMap<String, PathBuf>, SourceError> {
    let mut files = BTreeMap::new();

    for pattern in patterns {
        let full = root.join(pattern);
        let full = full.to_string_lossy();

        let paths = glob::glob(&full)
            .map_err(|e| SourceError::Unavailable(format!("invalid pattern {:?}: {}", pattern, e)))?;

        for entry in paths {
            let path = entry.map_err(|e| SourceError::Io(std::io::Error::from(e)))?;
            if !path.is_file() {
                continue;
            }
            if let Some(key) = source_key(root, &path) {
                files.entry(key).or_insert(path);
            }
        }
    }

    Ok(files)
}

fn source_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Split a `---` delimited YAML header from the body and deserialize it
pub fn parse_document(raw: &str) -> Result<(Frontmatter, Body), String> {
    let (header, body) = split_frontmatter(raw).ok_or_else(|| "no frontmatter block".to_string())?;
    let frontmatter: Frontmatter =
        serde_yaml::from_str(header).map_err(|e| format!("invalid frontmatter: {}", e))?;
    Ok((frontmatter, Body::new(body)))
}

/// Returns `(header, body)` when `raw` opens with a `---` line and has a
/// closing `---` line
fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let rest = raw
        .strip_prefix("---\r\n")
        .or_else(|| raw.strip_prefix("---\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }

    None
}

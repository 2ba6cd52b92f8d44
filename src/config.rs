//! Configuration for gazette.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (GAZETTE_CONTENT, GAZETTE_AUTHORS, GAZETTE_SITE_URL)
//! 2. Config file (.gazette/config.yaml)
//! 3. Defaults (./content, ./content/authors.yaml)
//!
//! Config file discovery:
//! - Searches current directory and parents for .gazette/config.yaml
//! - Paths in config file are relative to the project root (parent of .gazette/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ingest::DEFAULT_PATTERNS;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub site: Option<SiteConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Content root (relative to project root)
    pub dir: Option<String>,
    /// Discovery globs, relative to the content root
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Author directory YAML (relative to project root)
    pub authors: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub url: Option<String>,
    pub post_prefix: Option<String>,
    pub static_paths: Option<Vec<String>>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Content root
    pub content_dir: PathBuf,
    /// Discovery globs
    pub patterns: Vec<String>,
    /// Author directory file
    pub authors_file: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Site settings
    pub site: SiteSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub url: String,
    pub post_prefix: String,
    pub static_paths: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost".to_string(),
            post_prefix: "/posts".to_string(),
            static_paths: vec!["/".to_string(), "/posts".to_string(), "/about".to_string()],
        }
    }
}

fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".gazette").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge a parsed config file (if any) with the environment
fn resolve(config_path: Option<PathBuf>, file: Option<ConfigFile>) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    // Base directory is the parent of .gazette/ (i.e., grandparent of config.yaml)
    let base_dir = config_path
        .as_deref()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
        .unwrap_or(cwd);

    let content = file.as_ref().map(|f| f.content.clone()).unwrap_or_default();
    let site = file.as_ref().and_then(|f| f.site.clone());

    let content_dir = if let Ok(env_dir) = std::env::var("GAZETTE_CONTENT") {
        PathBuf::from(env_dir)
    } else if let Some(ref dir) = content.dir {
        resolve_path(&base_dir, dir)
    } else {
        base_dir.join("content")
    };

    let authors_file = if let Ok(env_authors) = std::env::var("GAZETTE_AUTHORS") {
        PathBuf::from(env_authors)
    } else if let Some(ref authors) = content.authors {
        resolve_path(&base_dir, authors)
    } else {
        content_dir.join("authors.yaml")
    };

    let patterns = if content.patterns.is_empty() {
        default_patterns()
    } else {
        content.patterns
    };

    let defaults = SiteSettings::default();
    let site = SiteSettings {
        url: std::env::var("GAZETTE_SITE_URL")
            .ok()
            .or_else(|| site.as_ref().and_then(|s| s.url.clone()))
            .unwrap_or(defaults.url),
        post_prefix: site
            .as_ref()
            .and_then(|s| s.post_prefix.clone())
            .unwrap_or(defaults.post_prefix),
        static_paths: site
            .as_ref()
            .and_then(|s| s.static_paths.clone())
            .unwrap_or(defaults.static_paths),
    };

    Ok(ResolvedConfig {
        content_dir,
        patterns,
        authors_file,
        config_file: config_path,
        site,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_path = find_config_file();
    let file = config_path.as_deref().map(load_config_file).transpose()?;
    resolve(config_path, file)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

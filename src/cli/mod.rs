//! Command-line interface for gazette.
//!
//! Builds the catalog from the configured content directory and answers
//! queries against it: listing, lookup by slug, tags, authors and the
//! sitemap.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::{self, ResolvedConfig};
use crate::domain::AuthorDirectory;
use crate::ingest::DirectorySource;
use crate::library::{build_catalog, CatalogBuild, CatalogEntry, CatalogQuery, CatalogStore};
use crate::sitemap::SitemapGenerator;

/// gazette - Content index and catalog query engine
#[derive(Parser, Debug)]
#[command(name = "gazette")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the catalog and report diagnostics
    Build {
        /// Fail if any diagnostic was produced
        #[arg(long)]
        strict: bool,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List catalog entries (newest first)
    List {
        /// Only entries in this category (analysis, news, guide)
        #[arg(short, long)]
        category: Option<String>,

        /// Only entries carrying this tag (exact match)
        #[arg(short, long)]
        tag: Option<String>,

        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one entry by slug
    Show {
        /// Entry slug
        slug: String,

        /// Print the document body too
        #[arg(short, long)]
        body: bool,
    },

    /// List every tag in use
    Tags,

    /// Show an author profile
    Author {
        /// Author id
        author_id: String,
    },

    /// Write the XML sitemap to stdout
    Sitemap,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?;

        match self.command {
            Commands::Build { strict, json } => build(cfg, strict, json).await,
            Commands::List {
                category,
                tag,
                limit,
                json,
            } => list(cfg, category, tag, limit, json).await,
            Commands::Show { slug, body } => show(cfg, &slug, body).await,
            Commands::Tags => tags(cfg).await,
            Commands::Author { author_id } => author(cfg, &author_id).await,
            Commands::Sitemap => sitemap(cfg).await,
            Commands::Config => show_config(cfg),
        }
    }
}

/// Load the content directory and build a catalog from it
async fn load_build(cfg: &ResolvedConfig) -> Result<(DirectorySource, CatalogBuild)> {
    let source = DirectorySource::load(&cfg.content_dir, &cfg.patterns)
        .await
        .with_context(|| format!("Failed to load content from {}", cfg.content_dir.display()))?;

    let build = build_catalog(&source)?;
    Ok((source, build))
}

/// Load the author directory; a missing file means no authors
async fn load_authors(cfg: &ResolvedConfig) -> Result<AuthorDirectory> {
    if !cfg.authors_file.exists() {
        warn!("Author directory not found: {}", cfg.authors_file.display());
        return Ok(AuthorDirectory::new());
    }

    AuthorDirectory::load(&cfg.authors_file)
        .await
        .with_context(|| format!("Failed to load authors: {}", cfg.authors_file.display()))
}

/// Build a query engine over a freshly built catalog
async fn open_query(cfg: &ResolvedConfig) -> Result<CatalogQuery> {
    let (_, build) = load_build(cfg).await?;
    let store = CatalogStore::new(build.catalog);
    let authors = load_authors(cfg).await?;
    Ok(store.query(Arc::new(authors)))
}

async fn build(cfg: &ResolvedConfig, strict: bool, json: bool) -> Result<()> {
    let (source, build) = load_build(cfg).await?;

    if json {
        let report = serde_json::json!({
            "entries": build.catalog.len(),
            "skipped": source.skipped(),
            "diagnostics": build.diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Entries:     {}", build.catalog.len());
        println!("Skipped:     {}", source.skipped().len());
        println!("Diagnostics: {}", build.diagnostics.len());

        for skipped in source.skipped() {
            println!("  skipped {}: {}", skipped.source_key, skipped.reason);
        }
        for diagnostic in &build.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    if strict {
        let problems = build.diagnostics.len() + source.skipped().len();
        if problems > 0 {
            anyhow::bail!("Strict build failed with {} problem(s)", problems);
        }
    }

    Ok(())
}

async fn list(
    cfg: &ResolvedConfig,
    category: Option<String>,
    tag: Option<String>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let query = open_query(cfg).await?;

    let mut entries = select(&query, category.as_deref(), tag.as_deref());
    entries.truncate(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found");
        return Ok(());
    }

    println!("{:<12} {:<10} {:<30} {:<40}", "DATE", "CATEGORY", "SLUG", "TITLE");
    println!("{}", "-".repeat(95));

    for entry in &entries {
        let date = entry
            .published
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{:<12} {:<10} {:<30} {:<40}",
            date,
            entry.category().to_string(),
            entry.slug,
            truncate(entry.title(), 40)
        );
    }

    println!("\nShown: {} of {}", entries.len(), query.catalog().len());

    Ok(())
}

async fn show(cfg: &ResolvedConfig, slug: &str, body: bool) -> Result<()> {
    let query = open_query(cfg).await?;

    let entry = query
        .get_by_slug(slug)
        .ok_or_else(|| anyhow::anyhow!("Entry not found: {}", slug))?;
    let fm = &entry.frontmatter;

    println!("Slug:      {}", entry.slug);
    println!("Source:    {}", entry.source_key);
    println!("Title:     {}", fm.title);
    if !fm.description.is_empty() {
        println!("Summary:   {}", fm.description);
    }
    println!("Published: {}", fm.published_at);
    println!("Category:  {}", fm.category);
    match query.author_of(entry) {
        Some(profile) => println!("Author:    {} ({})", profile.name, profile.role),
        None => println!("Author:    {} (unknown)", fm.author),
    }
    if !fm.tags.is_empty() {
        println!("Tags:      {}", fm.tags.join(", "));
    }
    if let Some(image) = &fm.image {
        println!("Image:     {}", image);
    }
    if let Some(minutes) = fm.read_time {
        println!("Read time: {} min", minutes);
    }

    if body {
        println!("\n{}", entry.body.as_str());
    }

    Ok(())
}

async fn tags(cfg: &ResolvedConfig) -> Result<()> {
    let query = open_query(cfg).await?;

    for tag in query.list_all_tags() {
        println!("{:<30} {}", tag, query.list_by_tag(&tag).count());
    }

    Ok(())
}

async fn author(cfg: &ResolvedConfig, author_id: &str) -> Result<()> {
    let authors = load_authors(cfg).await?;

    let profile = authors
        .get(author_id)
        .ok_or_else(|| anyhow::anyhow!("Author not found: {}", author_id))?;

    println!("Name: {}", profile.name);
    println!("Role: {}", profile.role);
    println!("Avatar: {}", profile.avatar);
    if let Some(handle) = &profile.twitter_handle {
        println!("Twitter: @{}", handle.trim_start_matches('@'));
    }
    println!("\n{}", profile.bio);

    Ok(())
}

async fn sitemap(cfg: &ResolvedConfig) -> Result<()> {
    let generator = SitemapGenerator::new(&cfg.site.url, &cfg.site.post_prefix)
        .with_static_paths(cfg.site.static_paths.iter().cloned());

    let loaded = load_build(cfg).await;
    let xml = generator.generate(loaded.as_ref().map(|(_, build)| &build.catalog))?;
    println!("{}", xml);

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Content:");
    println!("  Directory: {}", cfg.content_dir.display());
    println!("  Patterns:  {}", cfg.patterns.join(", "));
    println!("  Authors:   {}", cfg.authors_file.display());
    println!();
    println!("Site:");
    println!("  URL:          {}", cfg.site.url);
    println!("  Post prefix:  {}", cfg.site.post_prefix);
    println!("  Static paths: {}", cfg.site.static_paths.join(", "));

    Ok(())
}

/// Apply the optional category and tag filters through the query engine
fn select<'a>(
    query: &'a CatalogQuery,
    category: Option<&str>,
    tag: Option<&'a str>,
) -> Vec<&'a CatalogEntry> {
    let in_category = category.map(|name| query.list_by_category_name(name));

    match (in_category, tag) {
        (Some(in_category), Some(tag)) => query
            .list_by_tag(tag)
            .filter(|entry| in_category.contains(entry))
            .collect(),
        (Some(in_category), None) => in_category,
        (None, Some(tag)) => query.list_by_tag(tag).collect(),
        (None, None) => query.list_all().collect(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

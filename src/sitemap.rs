//! XML sitemap generation.
//!
//! Static site URLs first, then one URL per catalog entry. When the catalog
//! cannot be produced, the static URLs alone still make a valid document.

use std::io::Cursor;

use chrono::{DateTime, Utc};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use thiserror::Error;
use tracing::warn;

use crate::library::Catalog;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Errors that can occur while writing a sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Renders sitemaps for one site
#[derive(Debug, Clone)]
pub struct SitemapGenerator {
    /// Site origin without trailing slash (e.g. `https://example.com`)
    pub base_url: String,

    /// Path under which posts are served (e.g. `/posts`)
    pub post_prefix: String,

    /// Always-present pages
    pub static_paths: Vec<String>,
}

impl SitemapGenerator {
    pub fn new(base_url: impl Into<String>, post_prefix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            post_prefix: post_prefix.into().trim_end_matches('/').to_string(),
            static_paths: Vec::new(),
        }
    }

    pub fn with_static_paths(mut self, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.static_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Render from a catalog, or just the static pages if it is unavailable
    pub fn generate<E: std::fmt::Display>(
        &self,
        catalog: Result<&Catalog, E>,
    ) -> Result<String, SitemapError> {
        match catalog {
            Ok(catalog) => self.render(catalog.sitemap_entries()),
            Err(e) => {
                warn!("Sitemap falling back to static pages: {}", e);
                self.render(std::iter::empty::<(&str, Option<DateTime<Utc>>)>())
            }
        }
    }

    /// Render static pages followed by `(slug, lastmod)` pairs
    pub fn render<'a, I>(&self, posts: I) -> Result<String, SitemapError>
    where
        I: IntoIterator<Item = (&'a str, Option<DateTime<Utc>>)>,
    {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        for path in &self.static_paths {
            write_url(&mut writer, &self.absolute(path), None)?;
        }

        for (slug, lastmod) in posts {
            let loc = format!("{}{}/{}", self.base_url, self.post_prefix, slug);
            write_url(&mut writer, &loc, lastmod)?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let result = writer.into_inner().into_inner();
        Ok(String::from_utf8(result)?)
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn write_url<W: std::io::Write>(
    writer: &mut Writer<W>,
    loc: &str,
    lastmod: Option<DateTime<Utc>>,
) -> Result<(), SitemapError> {
    writer.write_event(Event::Start(BytesStart::new("url")))?;
    write_simple_element(writer, "loc", loc)?;
    if let Some(lastmod) = lastmod {
        write_simple_element(writer, "lastmod", &lastmod.format("%Y-%m-%d").to_string())?;
    }
    writer.write_event(Event::End(BytesEnd::new("url")))?;
    Ok(())
}

fn write_simple_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), SitemapError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generator() -> SitemapGenerator {
        SitemapGenerator::new("https://example.com/", "/posts").with_static_paths(["/", "about"])
    }

    #[test]
    fn test_render_static_then_posts() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let xml = generator()
            .render(vec![("beta", Some(date)), ("alpha", None)])
            .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
        assert!(xml.contains(
            "<url><loc>https://example.com/posts/beta</loc><lastmod>2024-06-01</lastmod></url>"
        ));
        assert!(xml.contains("<url><loc>https://example.com/posts/alpha</loc></url>"));

        let about = xml.find("/about<").unwrap();
        let beta = xml.find("/posts/beta<").unwrap();
        assert!(about < beta);
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = generator().render(vec![("q&a", None)]).unwrap();
        assert!(xml.contains("/posts/q&amp;a</loc>"));
    }

    #[test]
    fn test_fallback_on_catalog_failure() {
        let xml = generator()
            .generate::<&str>(Err("content source unavailable"))
            .unwrap();

        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.ends_with("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }
}

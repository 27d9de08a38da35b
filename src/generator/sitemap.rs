//! sitemap.xml generation

use chrono::{DateTime, Utc};

use crate::config::{SiteConfig, SitemapEntryConfig};
use crate::content::PostMeta;
use crate::helpers::{
    category_url, date_xml, escape_xml, page_url, post_url, site_url,
    CATEGORIES_ROUTE, HOME_ROUTE,
};

/// One `<url>` entry
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: String,
    pub priority: f32,
}

impl SitemapEntry {
    fn new(loc: String, lastmod: Option<DateTime<Utc>>, settings: &SitemapEntryConfig) -> Self {
        Self {
            loc,
            lastmod,
            changefreq: settings.changefreq.clone(),
            priority: settings.priority,
        }
    }
}

/// Entries for home, the category index, every page, every listed post and
/// every category, in that order.
///
/// Routes without a date of their own use `now` as lastmod. The route helpers
/// percent-encode slugs, so `<loc>` holds the same URL the pages link to.
pub fn sitemap_entries(
    config: &SiteConfig,
    posts: &[PostMeta],
    page_slugs: &[String],
    category_slugs: &[String],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let settings = &config.sitemap;
    let mut entries = vec![
        SitemapEntry::new(site_url(config, HOME_ROUTE), Some(now), &settings.home),
        SitemapEntry::new(
            site_url(config, CATEGORIES_ROUTE),
            Some(now),
            &settings.categories,
        ),
    ];

    entries.extend(page_slugs.iter().map(|slug| {
        SitemapEntry::new(site_url(config, &page_url(slug)), Some(now), &settings.about)
    }));

    entries.extend(posts.iter().map(|post| {
        SitemapEntry::new(
            site_url(config, &post_url(&post.slug)),
            post.date(),
            &settings.post,
        )
    }));

    entries.extend(category_slugs.iter().map(|slug| {
        SitemapEntry::new(
            site_url(config, &category_url(slug)),
            Some(now),
            &settings.category,
        )
    }));

    entries
}

/// Serialize entries as a sitemap document
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date_xml(lastmod)));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(&entry.changefreq)
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

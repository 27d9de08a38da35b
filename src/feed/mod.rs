//! Syndication feeds (RSS 2.0, Atom 1.0, JSON Feed 1.1)
//!
//! [`build_feed_source`] maps the post listing into a format-neutral
//! [`FeedSource`]; each submodule serializes that source into one format.

mod atom;
mod json;
mod rss;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::PostMeta;
use crate::helpers::{post_url, site_url, ATOM_ROUTE, JSON_FEED_ROUTE, RSS_ROUTE};

/// Site-level feed metadata plus one item per post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSource {
    pub title: String,
    pub description: String,
    /// Site root URL, with trailing slash
    pub id: String,
    pub link: String,
    pub language: String,
    pub favicon: String,
    pub copyright: String,
    pub author: FeedAuthor,
    pub feed_links: FeedLinks,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedAuthor {
    pub name: String,
    pub link: String,
}

/// Absolute URL of each syndication format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedLinks {
    pub rss2: String,
    pub atom: String,
    pub json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub title: String,
    pub id: String,
    pub link: String,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub categories: Vec<FeedCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedCategory {
    pub name: String,
    pub term: String,
}

/// Map posts (already filtered and sorted) into a feed source.
///
/// Items keep the order of `posts`, one per post. `year` goes into the
/// copyright line.
pub fn build_feed_source(config: &SiteConfig, posts: &[PostMeta], year: i32) -> FeedSource {
    let items = posts
        .iter()
        .map(|post| {
            let url = site_url(config, &post_url(&post.slug));
            FeedItem {
                title: post.frontmatter.title_or_empty().to_string(),
                id: url.clone(),
                link: url,
                description: post.frontmatter.description_or_empty().to_string(),
                date: post.date(),
                categories: post
                    .frontmatter
                    .categories
                    .iter()
                    .map(|name| FeedCategory {
                        name: name.clone(),
                        term: name.clone(),
                    })
                    .collect(),
            }
        })
        .collect();

    FeedSource {
        title: config.title.clone(),
        description: config.description.clone(),
        id: site_url(config, "/"),
        link: config.base_url().to_string(),
        language: config.language.clone(),
        favicon: site_url(config, "/favicon.ico"),
        copyright: format!("© {} {}", year, config.author.name),
        author: FeedAuthor {
            name: config.author.name.clone(),
            link: site_url(config, &config.author.url),
        },
        feed_links: FeedLinks {
            rss2: site_url(config, RSS_ROUTE),
            atom: site_url(config, ATOM_ROUTE),
            json: site_url(config, JSON_FEED_ROUTE),
        },
        items,
    }
}

/// The three syndication formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Rss,
    Atom,
    Json,
}

impl FeedFormat {
    pub const ALL: [FeedFormat; 3] = [FeedFormat::Rss, FeedFormat::Atom, FeedFormat::Json];

    /// HTTP Content-Type the format is served with
    pub fn content_type(&self) -> &'static str {
        match self {
            FeedFormat::Rss => "application/rss+xml; charset=utf-8",
            FeedFormat::Atom => "application/atom+xml; charset=utf-8",
            FeedFormat::Json => "application/feed+json; charset=utf-8",
        }
    }

    /// Output file name in the public directory
    pub fn file_name(&self) -> &'static str {
        match self {
            FeedFormat::Rss => "feed.xml",
            FeedFormat::Atom => "atom.xml",
            FeedFormat::Json => "feed.json",
        }
    }

    /// The format served at a request path, if any
    pub fn from_path(path: &str) -> Option<Self> {
        let name = path.trim_start_matches('/');
        Self::ALL.into_iter().find(|f| f.file_name() == name)
    }

    /// Serialize a feed source
    pub fn render(&self, source: &FeedSource) -> anyhow::Result<String> {
        match self {
            FeedFormat::Rss => Ok(rss::render(source)),
            FeedFormat::Atom => Ok(atom::render(source)),
            FeedFormat::Json => json::render(source),
        }
    }
}

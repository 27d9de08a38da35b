//! Post and Page models

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FrontMatter;

/// The two kinds of content the store knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// `{content}/{posts_dir}/{slug}.mdx`
    Post,
    /// `{content}/{slug}/index.mdx`
    Page,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Page => "page",
        }
    }
}

/// One physical content file
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDocument {
    /// File name without extension (posts) or directory name (pages)
    pub slug: String,
    pub frontmatter: FrontMatter,
    /// Raw, unrendered body
    pub body: String,
}

/// Listing projection of a post (no body)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMeta {
    pub slug: String,
    pub frontmatter: FrontMatter,
}

impl PostMeta {
    /// Publication date, if the front-matter carries a parseable one
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.frontmatter.parse_date()
    }
}

impl From<ContentDocument> for PostMeta {
    fn from(doc: ContentDocument) -> Self {
        Self {
            slug: doc.slug,
            frontmatter: doc.frontmatter,
        }
    }
}

/// A full post, body included
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub slug: String,
    pub frontmatter: FrontMatter,
    /// Raw markdown body
    pub content: String,
}

impl From<ContentDocument> for Post {
    fn from(doc: ContentDocument) -> Self {
        Self {
            slug: doc.slug,
            frontmatter: doc.frontmatter,
            content: doc.body,
        }
    }
}

/// A standalone page such as `about`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub slug: String,
    pub frontmatter: FrontMatter,
    pub content: String,
}

impl From<ContentDocument> for Page {
    fn from(doc: ContentDocument) -> Self {
        Self {
            slug: doc.slug,
            frontmatter: doc.frontmatter,
            content: doc.body,
        }
    }
}

/// A category with the number of published posts filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

//! Built-in blog theme using the Tera template engine
//!
//! Every template is embedded in the binary; there is no theme directory to
//! install.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{FrontMatter, Page, Post, PostMeta};
use crate::helpers::{category_to_slug, category_url, display_date, escape_html, post_url};

mod seo;

pub use seo::*;

/// Stylesheet written to `/style.css`
pub const STYLESHEET: &str = include_str!("theme/style.css");

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.set_escape_fn(escape_html);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            ("page.html", include_str!("theme/page.html")),
            ("categories.html", include_str!("theme/categories.html")),
            ("category.html", include_str!("theme/category.html")),
            ("404.html", include_str!("theme/404.html")),
            ("redirect.html", include_str!("theme/redirect.html")),
            // Partials
            (
                "partials/post_card.html",
                include_str!("theme/partials/post_card.html"),
            ),
            (
                "partials/theme_toggle.html",
                include_str!("theme/partials/theme_toggle.html"),
            ),
            (
                "partials/subscribe.html",
                include_str!("theme/partials/subscribe.html"),
            ),
        ])?;

        tera.register_filter("display_date", display_date_filter);
        tera.register_filter("category_slug", category_slug_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: "2024-06-01" -> "June 1, 2024"
fn display_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let raw = value.as_str();
    Ok(tera::Value::String(display_date(raw)))
}

/// Tera filter: category name -> slug
fn category_slug_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("category_slug", "value", String, value);
    Ok(tera::Value::String(category_to_slug(&s)))
}

// Data structures for template context

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub url: String,
    pub language: String,
    pub locale: String,
    pub author: AuthorData,
    pub push_app_id: Option<String>,
    pub year: i32,
}

impl SiteData {
    pub fn new(config: &SiteConfig, year: i32) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            url: config.base_url().to_string(),
            language: config.language.clone(),
            locale: config.locale.clone(),
            author: AuthorData {
                name: config.author.name.clone(),
                url: config.author.url.clone(),
                twitter: config.author.twitter.clone(),
                github: config.author.github.clone(),
                linkedin: config.author.linkedin.clone(),
            },
            push_app_id: config.push.app_id.clone(),
            year,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorData {
    pub name: String,
    pub url: String,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

/// Per-page head metadata, available as `seo`
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeoData {
    /// Page title; empty for the home page, which uses the site title alone
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// Open Graph type: "website" or "article"
    pub og_type: String,
    pub published_time: Option<String>,
    pub tags: Vec<String>,
    /// Serialized JSON-LD documents, safe to embed in a script tag
    pub json_ld: Vec<String>,
    pub noindex: bool,
}

/// A post as shown in listings
#[derive(Debug, Clone, Serialize)]
pub struct PostCardData {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub categories: Vec<CategoryLink>,
}

impl PostCardData {
    fn new(slug: &str, frontmatter: &FrontMatter) -> Self {
        Self {
            slug: slug.to_string(),
            url: post_url(slug),
            title: frontmatter.title_or_empty().to_string(),
            description: frontmatter.description_or_empty().to_string(),
            date: frontmatter.date.clone().unwrap_or_default(),
            categories: CategoryLink::all(&frontmatter.categories),
        }
    }
}

impl From<&PostMeta> for PostCardData {
    fn from(post: &PostMeta) -> Self {
        Self::new(&post.slug, &post.frontmatter)
    }
}

impl From<&Post> for PostCardData {
    fn from(post: &Post) -> Self {
        Self::new(&post.slug, &post.frontmatter)
    }
}

/// A static page, available as `page`
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    pub slug: String,
    pub title: String,
    pub description: String,
}

impl From<&Page> for PageData {
    fn from(page: &Page) -> Self {
        Self {
            slug: page.slug.clone(),
            title: page.frontmatter.title_or_empty().to_string(),
            description: page.frontmatter.description_or_empty().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
    pub count: usize,
}

impl CategoryLink {
    pub fn new(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            url: category_url(&category_to_slug(name)),
            count,
        }
    }

    fn all(names: &[String]) -> Vec<Self> {
        names.iter().map(|name| Self::new(name, 0)).collect()
    }
}

//! Head metadata and schema.org JSON-LD for rendered pages

use serde_json::{json, Value};

use super::SeoData;
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{post_url, site_url, HOME_ROUTE};

/// Serialize a JSON-LD document for embedding in a `<script>` element.
///
/// `<` is written as `\u003c` so the payload can never close the script tag.
pub fn script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

/// `WebSite` document for the home page
pub fn website_schema(config: &SiteConfig) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": config.title,
        "url": config.base_url(),
        "description": config.description,
        "author": person(config),
    })
}

/// `Article` document for a post
pub fn article_schema(config: &SiteConfig, post: &Post) -> Value {
    let frontmatter = &post.frontmatter;
    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": frontmatter.title_or_empty(),
        "description": frontmatter.description_or_empty(),
        "datePublished": frontmatter.date,
        "dateModified": frontmatter.date,
        "author": person(config),
        "publisher": {
            "@type": "Person",
            "name": config.author.name,
            "url": config.base_url(),
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": site_url(config, &post_url(&post.slug)),
        },
        "keywords": frontmatter.categories.join(", "),
    })
}

/// `BreadcrumbList` document; the last crumb usually has no link
pub fn breadcrumb_schema(crumbs: &[(&str, Option<String>)]) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, (name, item))| {
            let mut entry = json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
            });
            if let Some(item) = item {
                entry["item"] = json!(item);
            }
            entry
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// `Person` document for the about page
pub fn person_schema(config: &SiteConfig) -> Value {
    let author = &config.author;
    let same_as: Vec<&String> = [&author.twitter, &author.github, &author.linkedin]
        .into_iter()
        .flatten()
        .filter(|s| s.starts_with("http"))
        .collect();

    let mut value = person(config);
    value["@context"] = json!("https://schema.org");
    if let Some(job_title) = &author.job_title {
        value["jobTitle"] = json!(job_title);
    }
    if !same_as.is_empty() {
        value["sameAs"] = json!(same_as);
    }
    value
}

fn person(config: &SiteConfig) -> Value {
    json!({
        "@type": "Person",
        "name": config.author.name,
        "url": site_url(config, &config.author.url),
    })
}

impl SeoData {
    /// Metadata for a listing or static route
    pub fn website(config: &SiteConfig, title: &str, description: &str, path: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            canonical: site_url(config, path),
            og_type: "website".to_string(),
            ..Self::default()
        }
    }

    /// Metadata for a post page
    pub fn article(config: &SiteConfig, post: &Post) -> Self {
        let frontmatter = &post.frontmatter;
        let crumbs = [
            ("Home", Some(site_url(config, HOME_ROUTE))),
            ("Posts", Some(site_url(config, "/posts"))),
            (frontmatter.title_or_empty(), None),
        ];
        Self {
            title: frontmatter.title_or_empty().to_string(),
            description: frontmatter.description_or_empty().to_string(),
            canonical: site_url(config, &post_url(&post.slug)),
            og_type: "article".to_string(),
            published_time: frontmatter.date.clone(),
            tags: frontmatter.categories.clone(),
            json_ld: vec![
                script_json(&article_schema(config, post)),
                script_json(&breadcrumb_schema(&crumbs)),
            ],
            noindex: frontmatter.draft,
        }
    }

    /// Attach a JSON-LD document
    pub fn with_schema(mut self, value: &Value) -> Self {
        self.json_ld.push(script_json(value));
        self
    }
}

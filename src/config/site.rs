//! Site configuration (folio.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable that overrides the configured site URL
pub const SITE_URL_ENV: &str = "FOLIO_SITE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub locale: String,
    #[serde(default)]
    pub author: AuthorConfig,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
    #[serde(default = "default_redirects")]
    pub redirects: Vec<RedirectRule>,
    #[serde(default)]
    pub push: PushConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "folio".to_string(),
            description: "A personal blog about web development and technology.".to_string(),
            language: "en".to_string(),
            locale: "en_US".to_string(),
            author: AuthorConfig::default(),

            url: "http://localhost:4000".to_string(),

            content_dir: "content".to_string(),
            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            highlight: HighlightConfig::default(),
            sitemap: SitemapConfig::default(),
            robots: RobotsConfig::default(),
            redirects: default_redirects(),
            push: PushConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Apply `FOLIO_SITE_URL` if it is set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(SITE_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Site URL overridden by {}: {}", SITE_URL_ENV, url);
                self.url = url;
            }
        }
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Author and social profile information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    /// Profile page, usually the about page
    pub url: String,
    /// Handle including the leading `@`
    pub twitter: Option<String>,
    /// Profile URLs
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub job_title: Option<String>,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            url: "/about".to_string(),
            twitter: None,
            github: None,
            linkedin: None,
            job_title: None,
        }
    }
}

/// Syntax highlighting themes (syntect built-in theme names)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub light_theme: String,
    pub dark_theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            light_theme: "InspiredGitHub".to_string(),
            dark_theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Change frequency and priority of one class of sitemap entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapEntryConfig {
    pub changefreq: String,
    pub priority: f32,
}

impl SitemapEntryConfig {
    fn new(changefreq: &str, priority: f32) -> Self {
        Self {
            changefreq: changefreq.to_string(),
            priority,
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub home: SitemapEntryConfig,
    pub categories: SitemapEntryConfig,
    pub about: SitemapEntryConfig,
    pub post: SitemapEntryConfig,
    pub category: SitemapEntryConfig,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            home: SitemapEntryConfig::new("daily", 1.0),
            categories: SitemapEntryConfig::new("weekly", 0.8),
            about: SitemapEntryConfig::new("monthly", 0.5),
            post: SitemapEntryConfig::new("monthly", 0.7),
            category: SitemapEntryConfig::new("weekly", 0.6),
        }
    }
}

/// robots.txt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    pub disallow: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            disallow: vec!["/api/".to_string(), "/_next/".to_string()],
        }
    }
}

/// A permanent redirect from one route to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
}

fn default_redirects() -> Vec<RedirectRule> {
    vec![RedirectRule {
        from: "/posts".to_string(),
        to: "/".to_string(),
    }]
}

/// Push notification widget configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Vendor application id; the subscribe button is only rendered when set
    pub app_id: Option<String>,
}

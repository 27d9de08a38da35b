//! robots.txt generation

use crate::config::SiteConfig;
use crate::helpers::{site_url, SITEMAP_ROUTE};

pub fn render(config: &SiteConfig) -> String {
    let mut body = String::from("User-Agent: *\nAllow: /\n");
    for path in &config.robots.disallow {
        body.push_str(&format!("Disallow: {}\n", path));
    }
    body.push('\n');
    body.push_str(&format!("Host: {}\n", config.base_url()));
    body.push_str(&format!("Sitemap: {}\n", site_url(config, SITEMAP_ROUTE)));
    body
}

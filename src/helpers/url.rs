//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Site root route
pub const HOME_ROUTE: &str = "/";
/// Category index route
pub const CATEGORIES_ROUTE: &str = "/categories";
/// About page route
pub const ABOUT_ROUTE: &str = "/about";
/// RSS 2.0 feed route
pub const RSS_ROUTE: &str = "/feed.xml";
/// Atom feed route
pub const ATOM_ROUTE: &str = "/atom.xml";
/// JSON Feed route
pub const JSON_FEED_ROUTE: &str = "/feed.json";
/// Sitemap route
pub const SITEMAP_ROUTE: &str = "/sitemap.xml";

/// Route of a single post. The slug is percent-encoded as one segment.
///
/// # Examples
/// ```ignore
/// post_url("hello-world") // -> "/posts/hello-world"
/// ```
pub fn post_url(slug: &str) -> String {
    format!("/posts/{}", encode_segment(slug))
}

/// Route of a category listing, given its slug
///
/// # Examples
/// ```ignore
/// category_url("c#")    // -> "/categories/c%23"
/// category_url("ci/cd") // -> "/categories/ci%2Fcd"
/// ```
pub fn category_url(slug: &str) -> String {
    format!("{}/{}", CATEGORIES_ROUTE, encode_segment(slug))
}

/// Route of a static page
pub fn page_url(slug: &str) -> String {
    format!("/{}", encode_segment(slug))
}

/// Absolute URL for a route
///
/// # Examples
/// ```ignore
/// site_url(&config, "/about") // -> "https://example.com/about"
/// site_url(&config, "/")      // -> "https://example.com/"
/// ```
pub fn site_url(config: &SiteConfig, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", config.base_url(), path.trim_start_matches('/'))
}

/// Characters escaped in a path segment: everything but RFC 3986 unreserved
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Decode a route into the path a request for it resolves to.
///
/// The server and static hosts decode before looking up files, so this is
/// also where a route's output file lives. `None` for invalid UTF-8.
pub fn decode_route(route: &str) -> Option<String> {
    percent_decode_str(route)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_routes() {
        assert_eq!(post_url("hello"), "/posts/hello");
        assert_eq!(category_url("web-development"), "/categories/web-development");
        assert_eq!(page_url("about"), ABOUT_ROUTE);
    }

    #[test]
    fn test_routes_encode_slugs() {
        assert_eq!(category_url("c#"), "/categories/c%23");
        assert_eq!(category_url("ci/cd"), "/categories/ci%2Fcd");
        assert_eq!(post_url("a b"), "/posts/a%20b");
        assert_eq!(decode_route(&category_url("c#")).as_deref(), Some("/categories/c#"));
        assert_eq!(decode_route("/posts/%FF"), None);
    }

    #[test]
    fn test_site_url() {
        let config = test_config();
        assert_eq!(site_url(&config, "/"), "https://example.com/");
        assert_eq!(site_url(&config, "/about"), "https://example.com/about");
        assert_eq!(site_url(&config, "feed.xml"), "https://example.com/feed.xml");
        assert_eq!(
            site_url(&config, "https://other.org/x"),
            "https://other.org/x"
        );
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("web-dev_2.0~"), "web-dev_2.0~");
        assert_eq!(encode_segment("café"), "caf%C3%A9");
    }
}

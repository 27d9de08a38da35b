//! Permanent redirects for legacy routes

use crate::config::SiteConfig;
use crate::content::CategoryCount;
use crate::helpers::{
    category_to_slug, category_url, decode_route, legacy_category_slug, CATEGORIES_ROUTE,
};

/// Where a request path should permanently redirect to, if anywhere.
///
/// Configured rules are matched exactly (ignoring a trailing slash). A
/// category path whose slug contains `.` redirects to the same slug with the
/// periods removed.
pub fn resolve_redirect(config: &SiteConfig, path: &str) -> Option<String> {
    let normalized = normalize(path);

    if let Some(rule) = config
        .redirects
        .iter()
        .find(|rule| normalize(&rule.from) == normalized)
    {
        return Some(rule.to.clone());
    }

    let slug = normalized
        .strip_prefix(CATEGORIES_ROUTE)?
        .strip_prefix('/')?;
    if !slug.is_empty() && !slug.contains('/') && slug.contains('.') {
        let slug = decode_route(slug)?.replace('.', "");
        return (!slug.is_empty()).then(|| category_url(&slug));
    }

    None
}

/// Static redirect stubs to emit: (from, to) for every configured rule and
/// for every category whose dotted legacy slug differs from its slug
pub fn redirect_stubs(config: &SiteConfig, categories: &[CategoryCount]) -> Vec<(String, String)> {
    let mut stubs: Vec<(String, String)> = config
        .redirects
        .iter()
        .map(|rule| (normalize(&rule.from).to_string(), rule.to.clone()))
        .collect();

    for category in categories {
        let legacy = legacy_category_slug(&category.name);
        let current = category_to_slug(&category.name);
        if legacy != current && !current.is_empty() {
            stubs.push((category_url(&legacy), category_url(&current)));
        }
    }

    stubs
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedirectRule;

    #[test]
    fn test_default_rules() {
        let config = SiteConfig::default();
        assert_eq!(resolve_redirect(&config, "/posts"), Some("/".to_string()));
        assert_eq!(resolve_redirect(&config, "/posts/"), Some("/".to_string()));
        assert_eq!(
            resolve_redirect(&config, "/categories/next.js"),
            Some("/categories/nextjs".to_string())
        );
        assert_eq!(
            resolve_redirect(&config, "/categories/node.js.tips/"),
            Some("/categories/nodejstips".to_string())
        );
    }

    #[test]
    fn test_encoded_category_redirect() {
        let config = SiteConfig::default();
        assert_eq!(
            resolve_redirect(&config, "/categories/c%23.net"),
            Some("/categories/c%23net".to_string())
        );
        assert_eq!(resolve_redirect(&config, "/categories/..."), None);
    }

    #[test]
    fn test_no_redirect() {
        let config = SiteConfig::default();
        assert_eq!(resolve_redirect(&config, "/"), None);
        assert_eq!(resolve_redirect(&config, "/posts/hello"), None);
        assert_eq!(resolve_redirect(&config, "/categories/nextjs"), None);
        assert_eq!(resolve_redirect(&config, "/categories"), None);
        assert_eq!(resolve_redirect(&config, "/feed.xml"), None);
    }

    #[test]
    fn test_configured_rule() {
        let mut config = SiteConfig::default();
        config.redirects.push(RedirectRule {
            from: "/blog".to_string(),
            to: "/".to_string(),
        });
        assert_eq!(resolve_redirect(&config, "/blog/"), Some("/".to_string()));
    }

    #[test]
    fn test_redirect_stubs() {
        let config = SiteConfig::default();
        let categories = vec![
            CategoryCount {
                name: "Next.js".to_string(),
                count: 2,
            },
            CategoryCount {
                name: "Web Development".to_string(),
                count: 1,
            },
            CategoryCount {
                name: "...".to_string(),
                count: 1,
            },
        ];
        let stubs = redirect_stubs(&config, &categories);
        assert_eq!(
            stubs,
            vec![
                ("/posts".to_string(), "/".to_string()),
                ("/categories/next.js".to_string(), "/categories/nextjs".to_string()),
            ]
        );
    }
}

//! Category name to URL slug mapping

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Map a category name to its URL slug.
///
/// Lowercases, removes every `.`, then collapses each whitespace run into a
/// single `-`. The mapping is lossy, so there is no inverse here; reverse
/// lookups go through the post index.
///
/// # Examples
/// ```
/// use folio::helpers::category_to_slug;
/// assert_eq!(category_to_slug("Next.js"), "nextjs");
/// assert_eq!(category_to_slug("Web Development"), "web-development");
/// ```
pub fn category_to_slug(name: &str) -> String {
    let lowered = name.to_lowercase().replace('.', "");
    WHITESPACE.replace_all(&lowered, "-").into_owned()
}

/// The slug a category had before periods were stripped from slugs.
///
/// Used to emit redirects from old category URLs such as `/categories/next.js`.
pub fn legacy_category_slug(name: &str) -> String {
    WHITESPACE
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

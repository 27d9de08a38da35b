//! Configuration module

mod site;

pub use site::AuthorConfig;
pub use site::HighlightConfig;
pub use site::PushConfig;
pub use site::RedirectRule;
pub use site::RobotsConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::SitemapEntryConfig;
pub use site::SITE_URL_ENV;

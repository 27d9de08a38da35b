//! Content module - reading, indexing and rendering posts and pages

pub mod error;
mod frontmatter;
pub mod index;
mod markdown;
pub mod pages;
mod post;
pub mod store;

pub use error::ContentError;
pub use frontmatter::{parse_date_string, FrontMatter};
pub use index::PostIndex;
pub use markdown::{Highlighter, MarkdownRenderer, ThemeMode};
pub use pages::PageResolver;
pub use post::{CategoryCount, ContentDocument, ContentKind, Page, Post, PostMeta};
pub use store::ContentStore;

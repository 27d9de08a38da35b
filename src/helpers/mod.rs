//! Helper functions shared by the generator, feeds and templates
//!
//! URL construction, slug derivation, date formatting and escaping.

mod date;
mod html;
mod slug;
mod url;

pub use date::*;
pub use html::*;
pub use self::slug::*;
pub use url::*;

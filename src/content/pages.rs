//! Page resolver - static pages looked up by slug

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::Result;
use super::{ContentKind, ContentStore, Page};

/// Resolves standalone pages, memoizing each lookup.
///
/// Meant to live for a single render pass: content is immutable within a
/// pass, so hits and misses are both remembered until [`Self::invalidate`]
/// or until the resolver is dropped.
pub struct PageResolver<'a> {
    store: &'a ContentStore,
    memo: Mutex<HashMap<String, Option<Page>>>,
}

impl<'a> PageResolver<'a> {
    pub fn new(store: &'a ContentStore) -> Self {
        Self {
            store,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// The page stored under `{content}/{slug}/index.mdx`, if any
    pub fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = memo.get(slug) {
            return Ok(cached.clone());
        }

        let page = self
            .store
            .get_by_slug(ContentKind::Page, slug)?
            .map(Page::from);
        memo.insert(slug.to_string(), page.clone());
        Ok(page)
    }

    /// Every page in the content directory, in slug order
    pub fn get_all_pages(&self) -> Result<Vec<Page>> {
        let pages: Vec<Page> = self
            .store
            .list_all(ContentKind::Page)?
            .into_iter()
            .map(Page::from)
            .collect();

        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
        for page in &pages {
            memo.insert(page.slug.clone(), Some(page.clone()));
        }
        Ok(pages)
    }

    /// Forget every memoized lookup
    pub fn invalidate(&self) {
        self.memo.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

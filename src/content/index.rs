//! Post index - sorted and filtered views over the post corpus

use indexmap::IndexMap;

use super::error::Result;
use super::{CategoryCount, ContentKind, ContentStore, Post, PostMeta};
use crate::helpers::category_to_slug;

/// Queries over all posts in a [`ContentStore`].
///
/// Every query reads the store again; nothing is cached between calls.
/// Drafts are left out of every listing and aggregate but can still be
/// fetched by exact slug.
pub struct PostIndex<'a> {
    store: &'a ContentStore,
}

impl<'a> PostIndex<'a> {
    pub fn new(store: &'a ContentStore) -> Self {
        Self { store }
    }

    /// All non-draft posts, newest first.
    ///
    /// The sort is stable, so posts with equal dates keep file name order.
    /// Posts without a parseable date go last.
    pub fn get_all_posts(&self) -> Result<Vec<PostMeta>> {
        let mut posts: Vec<PostMeta> = self
            .store
            .list_all(ContentKind::Post)?
            .into_iter()
            .filter(|doc| !doc.frontmatter.draft)
            .map(PostMeta::from)
            .collect();

        // Option orders None first, so reversing puts undated posts last
        posts.sort_by_cached_key(|post| std::cmp::Reverse(post.date()));

        Ok(posts)
    }

    /// A single post by slug, drafts included
    pub fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        Ok(self
            .store
            .get_by_slug(ContentKind::Post, slug)?
            .map(Post::from))
    }

    /// Distinct categories of non-draft posts with their post counts.
    ///
    /// Sorted by count descending; equal counts keep first-seen order.
    pub fn get_all_categories(&self) -> Result<Vec<CategoryCount>> {
        Ok(aggregate_categories(&self.get_all_posts()?))
    }

    /// Non-draft posts filed under `category`, matched case-insensitively,
    /// in the same order as [`Self::get_all_posts`]
    pub fn get_posts_by_category(&self, category: &str) -> Result<Vec<PostMeta>> {
        let wanted = category.to_lowercase();
        Ok(self
            .get_all_posts()?
            .into_iter()
            .filter(|post| {
                post.frontmatter
                    .categories
                    .iter()
                    .any(|c| c.to_lowercase() == wanted)
            })
            .collect())
    }

    /// Every post slug, drafts included, in file name order
    pub fn get_all_slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .list_all(ContentKind::Post)?
            .into_iter()
            .map(|doc| doc.slug)
            .collect())
    }

    /// Slugs of [`Self::get_all_categories`], in the same order
    pub fn get_all_category_slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .get_all_categories()?
            .iter()
            .map(|c| category_to_slug(&c.name))
            .collect())
    }

    /// The category name a slug stands for.
    ///
    /// Colliding slugs are not detected; the first category in
    /// [`Self::get_all_categories`] order wins.
    pub fn slug_to_category(&self, slug: &str) -> Result<Option<String>> {
        Ok(find_category(&self.get_all_categories()?, slug))
    }
}

/// Count categories in one pass, keeping first-seen order, then sort by count
pub fn aggregate_categories(posts: &[PostMeta]) -> Vec<CategoryCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for post in posts {
        for category in &post.frontmatter.categories {
            *counts.entry(category.as_str()).or_insert(0) += 1;
        }
    }

    let mut categories: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, count)| CategoryCount {
            name: name.to_string(),
            count,
        })
        .collect();
    categories.sort_by(|a, b| b.count.cmp(&a.count));
    categories
}

/// First category whose slug equals `slug`
pub fn find_category(categories: &[CategoryCount], slug: &str) -> Option<String> {
    categories
        .iter()
        .find(|c| category_to_slug(&c.name) == slug)
        .map(|c| c.name.clone())
}

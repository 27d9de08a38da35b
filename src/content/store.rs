//! Content store - reads posts and pages from the content directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::{ContentDocument, ContentKind, FrontMatter};

/// Extension of every content document
pub const CONTENT_EXTENSION: &str = "mdx";

/// File name of a page inside its own directory
pub const PAGE_INDEX_FILE: &str = "index.mdx";

/// Read-only view over the content directory.
///
/// Nothing is cached: every call goes back to the filesystem.
#[derive(Debug, Clone)]
pub struct ContentStore {
    content_dir: PathBuf,
    posts_dir: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `content_dir`, with posts under `content_dir/posts_dir`
    pub fn new<P: AsRef<Path>>(content_dir: P, posts_dir: &str) -> Self {
        let content_dir = content_dir.as_ref().to_path_buf();
        let posts_dir = content_dir.join(posts_dir);
        Self {
            content_dir,
            posts_dir,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// All documents of a kind, in file name order.
    ///
    /// A missing directory yields an empty list.
    pub fn list_all(&self, kind: ContentKind) -> Result<Vec<ContentDocument>> {
        let paths = match kind {
            ContentKind::Post => self.post_paths()?,
            ContentKind::Page => self.page_paths()?,
        };

        let mut documents = Vec::with_capacity(paths.len());
        for (slug, path) in paths {
            if let Some(doc) = read_document(&slug, &path)? {
                documents.push(doc);
            }
        }

        tracing::debug!("Listed {} {}s", documents.len(), kind.label());
        Ok(documents)
    }

    /// A single document by slug, or `None` when no file backs it
    pub fn get_by_slug(&self, kind: ContentKind, slug: &str) -> Result<Option<ContentDocument>> {
        if !is_single_segment(slug) {
            return Ok(None);
        }

        let path = self.path_for(kind, slug);
        if !path.is_file() {
            return Ok(None);
        }

        read_document(slug, &path)
    }

    /// Where a document of this kind and slug lives (whether or not it exists)
    pub fn path_for(&self, kind: ContentKind, slug: &str) -> PathBuf {
        match kind {
            ContentKind::Post => self
                .posts_dir
                .join(format!("{}.{}", slug, CONTENT_EXTENSION)),
            ContentKind::Page => self.content_dir.join(slug).join(PAGE_INDEX_FILE),
        }
    }

    /// (slug, path) of every post file
    fn post_paths(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.posts_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in shallow_walk(&self.posts_dir) {
            let entry = entry.map_err(|source| ContentError::List {
                path: self.posts_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !is_content_file(path) {
                continue;
            }
            if let Some(slug) = path.file_stem().and_then(|s| s.to_str()) {
                paths.push((slug.to_string(), path.to_path_buf()));
            }
        }

        Ok(paths)
    }

    /// (slug, path) of every page directory that holds an index document
    fn page_paths(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.content_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in shallow_walk(&self.content_dir) {
            let entry = entry.map_err(|source| ContentError::List {
                path: self.content_dir.clone(),
                source,
            })?;
            let dir = entry.path();
            if !dir.is_dir() || dir == self.posts_dir {
                continue;
            }
            let index = dir.join(PAGE_INDEX_FILE);
            if !index.is_file() {
                continue;
            }
            if let Some(slug) = dir.file_name().and_then(|s| s.to_str()) {
                paths.push((slug.to_string(), index));
            }
        }

        Ok(paths)
    }
}

/// Direct children of `dir`, sorted by file name
fn shallow_walk(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
}

/// Read and parse one document. A file that vanished in between is `None`.
fn read_document(slug: &str, path: &Path) -> Result<Option<ContentDocument>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ContentError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let (frontmatter, body) = {
        let _span = tracing::warn_span!("document", path = %path.display()).entered();
        FrontMatter::parse(&raw)
    };
    Ok(Some(ContentDocument {
        slug: slug.to_string(),
        frontmatter,
        body: body.to_string(),
    }))
}

/// Check if a file is a content document
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == CONTENT_EXTENSION)
        .unwrap_or(false)
}

/// Slugs map to exactly one path component
fn is_single_segment(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains('/')
        && !slug.contains('\\')
}

//! Create a new post

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::ContentKind;
use crate::Blog;

/// Options for `folio new`
#[derive(Debug, Clone, Default)]
pub struct NewPostOptions {
    /// File name without extension; derived from the title when absent
    pub slug: Option<String>,
    pub categories: Vec<String>,
    pub draft: bool,
}

#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    description: &'a str,
    categories: &'a [String],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    draft: bool,
}

/// Write a post scaffold and return its path. Never overwrites.
pub fn create_post(blog: &Blog, title: &str, options: &NewPostOptions) -> Result<PathBuf> {
    let slug = match &options.slug {
        Some(slug) => slug.clone(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) || slug.starts_with('.') {
        anyhow::bail!("Invalid slug {:?}; pass --slug with a plain file name", slug);
    }

    let store = blog.store();
    let file_path = store.path_for(ContentKind::Post, &slug);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        description: "",
        categories: &options.categories,
        draft: options.draft,
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&scaffold)?);

    fs::create_dir_all(store.posts_dir())?;
    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostIndex;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_round_trips_through_index() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let options = NewPostOptions {
            categories: vec!["Next.js".to_string()],
            ..Default::default()
        };

        let path = blog.new_post("Hello: World", &options).unwrap();
        assert_eq!(path, dir.path().join("content/posts/hello-world.mdx"));

        let store = blog.store();
        let post = PostIndex::new(&store)
            .get_post_by_slug("hello-world")
            .unwrap()
            .unwrap();
        assert_eq!(post.frontmatter.title.as_deref(), Some("Hello: World"));
        assert_eq!(post.frontmatter.categories, vec!["Next.js"]);
        assert!(!post.frontmatter.draft);
        assert!(post.frontmatter.parse_date().is_some());
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let options = NewPostOptions {
            slug: Some("mine".to_string()),
            draft: true,
            ..Default::default()
        };

        blog.new_post("First", &options).unwrap();
        assert!(blog.new_post("Second", &options).is_err());

        let body = fs::read_to_string(dir.path().join("content/posts/mine.mdx")).unwrap();
        assert!(body.contains("title: First"));
        assert!(body.contains("draft: true"));
    }

    #[test]
    fn test_rejects_path_slug() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        let options = NewPostOptions {
            slug: Some("../escape".to_string()),
            ..Default::default()
        };
        assert!(blog.new_post("Nope", &options).is_err());
    }
}

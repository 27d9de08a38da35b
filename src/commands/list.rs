//! List site content

use anyhow::Result;

use crate::content::{ContentKind, PageResolver, PostIndex};
use crate::helpers::{category_to_slug, display_date};
use crate::Blog;

/// Print content of a kind: post, page, category or draft
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    for line in lines(blog, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

fn lines(blog: &Blog, content_type: &str) -> Result<Vec<String>> {
    let store = blog.store();
    let index = PostIndex::new(&store);
    let mut out = Vec::new();

    match content_type {
        "post" | "posts" => {
            let posts = index.get_all_posts()?;
            out.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                out.push(format!(
                    "  {} - {} [{}]",
                    display_date(post.frontmatter.date.as_deref()),
                    post.frontmatter.title_or_empty(),
                    post.slug
                ));
            }
        }
        "page" | "pages" => {
            let pages = PageResolver::new(&store).get_all_pages()?;
            out.push(format!("Pages ({}):", pages.len()));
            for page in pages {
                out.push(format!("  {} [{}]", page.frontmatter.title_or_empty(), page.slug));
            }
        }
        "category" | "categories" => {
            let categories = index.get_all_categories()?;
            out.push(format!("Categories ({}):", categories.len()));
            for category in categories {
                out.push(format!(
                    "  {} ({}) [{}]",
                    category.name,
                    category.count,
                    category_to_slug(&category.name)
                ));
            }
        }
        "draft" | "drafts" => {
            let drafts: Vec<_> = store
                .list_all(ContentKind::Post)?
                .into_iter()
                .filter(|doc| doc.frontmatter.draft)
                .collect();
            out.push(format!("Drafts ({}):", drafts.len()));
            for draft in drafts {
                out.push(format!("  {} [{}]", draft.frontmatter.title_or_empty(), draft.slug));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, category, draft",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn blog() -> (TempDir, Blog) {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("content/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("a.mdx"),
            "---\ntitle: Alpha\ndate: 2024-01-01\ncategories: [Web Dev]\n---\n",
        )
        .unwrap();
        fs::write(posts.join("b.mdx"), "---\ntitle: Beta\ndraft: true\n---\n").unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_list_posts_and_drafts() {
        let (_dir, blog) = blog();
        let posts = lines(&blog, "post").unwrap();
        assert_eq!(posts[0], "Posts (1):");
        assert_eq!(posts[1], "  January 1, 2024 - Alpha [a]");

        let drafts = lines(&blog, "draft").unwrap();
        assert_eq!(drafts, vec!["Drafts (1):", "  Beta [b]"]);
    }

    #[test]
    fn test_list_categories() {
        let (_dir, blog) = blog();
        let categories = lines(&blog, "categories").unwrap();
        assert_eq!(categories, vec!["Categories (1):", "  Web Dev (1) [web-dev]"]);
    }

    #[test]
    fn test_unknown_type() {
        let (_dir, blog) = blog();
        assert!(lines(&blog, "tag").is_err());
    }
}

//! Generator module - writes the static site using the built-in Tera templates

pub mod redirects;
pub mod robots;
pub mod sitemap;

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Datelike, Utc};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{CategoryCount, MarkdownRenderer, PageResolver, PostIndex, PostMeta};
use crate::feed::{build_feed_source, FeedFormat};
use crate::helpers::{
    category_url, decode_route, page_url, post_url, site_url, ABOUT_ROUTE, CATEGORIES_ROUTE,
    HOME_ROUTE,
};
use crate::templates::{
    breadcrumb_schema, person_schema, website_schema, CategoryLink, PageData, PostCardData,
    SeoData, SiteData, TemplateRenderer, STYLESHEET,
};
use crate::Blog;

/// Top-level routes a page directory may not shadow
const RESERVED_PAGE_SLUGS: &[&str] = &["posts", "categories"];

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_config(&blog.config.highlight);

        Ok(Self {
            blog: blog.clone(),
            renderer,
            markdown,
        })
    }

    /// Run one render pass over the whole site.
    ///
    /// Every query goes back to the content directory, so calling this again
    /// after an edit picks up the change.
    pub fn generate(&self) -> Result<()> {
        let store = self.blog.store();
        let index = PostIndex::new(&store);
        let pages = PageResolver::new(&store);

        fs::create_dir_all(&self.blog.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.blog.public_dir))?;

        let now = Utc::now();
        let site = SiteData::new(&self.blog.config, now.year());

        let posts = index.get_all_posts()?;
        let categories = index.get_all_categories()?;

        self.generate_index(&site, &posts)?;
        let post_count = self.generate_posts(&site, &index)?;
        self.generate_categories(&site, &index, &categories)?;
        let page_slugs = self.generate_pages(&site, &pages)?;
        self.generate_feeds(&posts, now.year())?;
        self.generate_sitemap(&index, &posts, &page_slugs, now)?;
        self.write_file("robots.txt", &robots::render(&self.blog.config))?;
        self.generate_not_found(&site)?;
        self.generate_redirects(&site, &categories)?;
        self.write_file("style.css", STYLESHEET)?;
        self.copy_static_assets()?;

        tracing::info!(
            "Generated {} posts ({} listed), {} categories, {} pages",
            post_count,
            posts.len(),
            categories.len(),
            page_slugs.len()
        );
        Ok(())
    }

    fn create_base_context(&self, site: &SiteData, seo: &SeoData) -> Context {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("seo", seo);
        context
    }

    /// Home page: every listed post, newest first
    fn generate_index(&self, site: &SiteData, posts: &[PostMeta]) -> Result<()> {
        let config = &self.blog.config;
        let seo = SeoData::website(config, "", &config.description, HOME_ROUTE)
            .with_schema(&website_schema(config));

        let cards: Vec<PostCardData> = posts.iter().map(PostCardData::from).collect();
        let mut context = self.create_base_context(site, &seo);
        context.insert("posts", &cards);

        let html = self.renderer.render("index.html", &context)?;
        self.write_route(HOME_ROUTE, &html)
    }

    /// One page per slug, drafts included
    fn generate_posts(&self, site: &SiteData, index: &PostIndex) -> Result<usize> {
        let config = &self.blog.config;
        let mut count = 0;

        for slug in index.get_all_slugs()? {
            let Some(post) = index.get_post_by_slug(&slug)? else {
                tracing::warn!("Post {} disappeared during generation", slug);
                continue;
            };

            let content = self
                .markdown
                .render(&post.content)
                .with_context(|| format!("Failed to render post {}", slug))?;

            let seo = SeoData::article(config, &post);
            let mut context = self.create_base_context(site, &seo);
            context.insert("post", &PostCardData::from(&post));
            context.insert("content", &content);

            let html = self.renderer.render("post.html", &context)?;
            self.write_route(&post_url(&slug), &html)?;
            tracing::debug!("Generated post: {}", slug);
            count += 1;
        }

        Ok(count)
    }

    /// Category index plus one listing per category
    fn generate_categories(
        &self,
        site: &SiteData,
        index: &PostIndex,
        categories: &[CategoryCount],
    ) -> Result<()> {
        let config = &self.blog.config;

        let links: Vec<CategoryLink> = categories
            .iter()
            .map(|c| CategoryLink::new(&c.name, c.count))
            .collect();
        let seo = SeoData::website(
            config,
            "Categories",
            "Browse all blog post categories",
            CATEGORIES_ROUTE,
        );
        let mut context = self.create_base_context(site, &seo);
        context.insert("categories", &links);
        let html = self.renderer.render("categories.html", &context)?;
        self.write_route(CATEGORIES_ROUTE, &html)?;

        for slug in routable_category_slugs(index)? {
            let Some(name) = index.slug_to_category(&slug)? else {
                continue;
            };
            let posts = index.get_posts_by_category(&name)?;
            let cards: Vec<PostCardData> = posts.iter().map(PostCardData::from).collect();

            let route = category_url(&slug);
            let crumbs = [
                ("Home", Some(site_url(config, HOME_ROUTE))),
                ("Categories", Some(site_url(config, CATEGORIES_ROUTE))),
                (name.as_str(), None),
            ];
            let seo = SeoData::website(
                config,
                &name,
                &format!("All blog posts in the {} category", name),
                &route,
            )
            .with_schema(&breadcrumb_schema(&crumbs));

            let mut context = self.create_base_context(site, &seo);
            context.insert("category", &CategoryLink::new(&name, cards.len()));
            context.insert("posts", &cards);
            let html = self.renderer.render("category.html", &context)?;
            self.write_route(&route, &html)?;
        }

        tracing::info!("Generated {} category pages", categories.len());
        Ok(())
    }

    /// Static pages; returns the slugs that were written
    fn generate_pages(&self, site: &SiteData, pages: &PageResolver) -> Result<Vec<String>> {
        let config = &self.blog.config;
        let mut slugs = Vec::new();

        for page in pages.get_all_pages()? {
            if RESERVED_PAGE_SLUGS.contains(&page.slug.as_str()) {
                tracing::warn!("Skipping page {:?}: the route is reserved", page.slug);
                continue;
            }

            let content = self
                .markdown
                .render(&page.content)
                .with_context(|| format!("Failed to render page {}", page.slug))?;

            let route = page_url(&page.slug);
            let data = PageData::from(&page);
            let mut seo = SeoData::website(config, &data.title, &data.description, &route);
            if route == ABOUT_ROUTE {
                seo = seo.with_schema(&person_schema(config));
            }

            let mut context = self.create_base_context(site, &seo);
            context.insert("page", &data);
            context.insert("content", &content);
            let html = self.renderer.render("page.html", &context)?;
            self.write_route(&route, &html)?;
            tracing::debug!("Generated page: {}", page.slug);
            slugs.push(page.slug);
        }

        Ok(slugs)
    }

    fn generate_feeds(&self, posts: &[PostMeta], year: i32) -> Result<()> {
        let source = build_feed_source(&self.blog.config, posts, year);
        for format in FeedFormat::ALL {
            let body = format.render(&source)?;
            self.write_file(format.file_name(), &body)?;
        }
        tracing::info!("Generated feeds with {} items", source.items.len());
        Ok(())
    }

    fn generate_sitemap(
        &self,
        index: &PostIndex,
        posts: &[PostMeta],
        page_slugs: &[String],
        now: DateTime<Utc>,
    ) -> Result<()> {
        let category_slugs = routable_category_slugs(index)?;
        let entries =
            sitemap::sitemap_entries(&self.blog.config, posts, page_slugs, &category_slugs, now);
        self.write_file("sitemap.xml", &sitemap::render(&entries))
    }

    fn generate_not_found(&self, site: &SiteData) -> Result<()> {
        let seo = SeoData {
            title: "Page Not Found".to_string(),
            description: self.blog.config.description.clone(),
            og_type: "website".to_string(),
            noindex: true,
            ..SeoData::default()
        };
        let context = self.create_base_context(site, &seo);
        let html = self.renderer.render("404.html", &context)?;
        self.write_file("404.html", &html)
    }

    /// Meta-refresh stubs so legacy URLs keep working without a server
    fn generate_redirects(&self, site: &SiteData, categories: &[CategoryCount]) -> Result<()> {
        let stubs = redirects::redirect_stubs(&self.blog.config, categories);
        for (from, to) in &stubs {
            let mut context = Context::new();
            context.insert("site", site);
            context.insert("target", to);
            let html = self.renderer.render("redirect.html", &context)?;
            self.write_route(from, &html)?;
            tracing::debug!("Generated redirect: {} -> {}", from, to);
        }
        Ok(())
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.is_dir() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
        }

        Ok(())
    }

    /// Write `html` as the `index.html` of a route directory.
    ///
    /// Routes are percent-encoded URLs; the file goes where a request for the
    /// route resolves once decoded.
    fn write_route(&self, route: &str, html: &str) -> Result<()> {
        let Some(decoded) = decode_route(route) else {
            bail!("Route {:?} is not valid UTF-8 once decoded", route);
        };
        let decoded = decoded.trim_matches('/');
        if decoded.split('/').any(|segment| segment == "..") {
            bail!("Route {:?} escapes the public directory", route);
        }
        self.write_file(Path::new(decoded).join("index.html"), html)
    }

    fn write_file<P: AsRef<Path>>(&self, relative: P, body: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, body)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

/// Category slugs that can have a page of their own.
///
/// A name made only of periods maps to an empty slug, whose route would be
/// the category index itself.
fn routable_category_slugs(index: &PostIndex) -> Result<Vec<String>> {
    let mut slugs = index.get_all_category_slugs()?;
    slugs.retain(|slug| {
        if slug.is_empty() {
            tracing::warn!("Skipping category page with an empty slug");
        }
        !slug.is_empty()
    });
    Ok(slugs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, body: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn site() -> (TempDir, Blog) {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "content/posts/hello.mdx",
            "---\ntitle: Hello\ndate: 2024-06-01\ncategories: [Next.js, Rust]\n---\n\n# Hi\n\n```rust\nfn main() {}\n```\n",
        );
        write(
            dir.path(),
            "content/posts/secret.mdx",
            "---\ntitle: Secret\ndate: 2024-07-01\ndraft: true\ncategories: Hidden\n---\nShh\n",
        );
        write(
            dir.path(),
            "content/about/index.mdx",
            "---\ntitle: About\n---\nAbout me\n",
        );
        write(dir.path(), "static/favicon.ico", "icon");
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_generate_writes_every_route() {
        let (_dir, blog) = site();
        Generator::new(&blog).unwrap().generate().unwrap();
        let public = &blog.public_dir;

        for file in [
            "index.html",
            "posts/hello/index.html",
            "posts/secret/index.html",
            "categories/index.html",
            "categories/nextjs/index.html",
            "categories/rust/index.html",
            "about/index.html",
            "feed.xml",
            "atom.xml",
            "feed.json",
            "sitemap.xml",
            "robots.txt",
            "404.html",
            "style.css",
            "favicon.ico",
            "posts/index.html",
            "categories/next.js/index.html",
        ] {
            assert!(public.join(file).is_file(), "missing {}", file);
        }
        assert!(!public.join("categories/hidden/index.html").exists());
    }

    #[test]
    fn test_drafts_are_unlisted() {
        let (_dir, blog) = site();
        Generator::new(&blog).unwrap().generate().unwrap();
        let public = &blog.public_dir;

        let home = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(home.contains("Hello"));
        assert!(!home.contains("Secret"));

        let feed = fs::read_to_string(public.join("feed.xml")).unwrap();
        assert!(!feed.contains("Secret"));

        let draft = fs::read_to_string(public.join("posts/secret/index.html")).unwrap();
        assert!(draft.contains(r#"<meta name="robots" content="noindex">"#));
    }

    #[test]
    fn test_post_page_content() {
        let (_dir, blog) = site();
        Generator::new(&blog).unwrap().generate().unwrap();
        let html = fs::read_to_string(blog.public_dir.join("posts/hello/index.html")).unwrap();
        assert!(html.contains("<title>Hello | "));
        assert!(html.contains("June 1, 2024"));
        assert!(html.contains("code-block"));
        assert!(html.contains(r#"href="/categories/nextjs""#));
        assert!(html.contains("application/ld+json"));
    }

    #[test]
    fn test_empty_category_slug_keeps_index() {
        let (dir, blog) = site();
        write(
            dir.path(),
            "content/posts/dots.mdx",
            "---\ntitle: Dots\ndate: 2024-05-01\ncategories: [Rust, \"...\"]\n---\nBody\n",
        );
        Generator::new(&blog).unwrap().generate().unwrap();
        let public = &blog.public_dir;

        let index = fs::read_to_string(public.join("categories/index.html")).unwrap();
        assert!(index.contains("category-list"));
        assert!(index.contains("Rust"));
        assert!(!public.join("categories/.../index.html").exists());

        let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
        assert!(!sitemap.contains("/categories/</loc>"));
    }

    #[test]
    fn test_category_urls_match_output() {
        let (dir, blog) = site();
        write(
            dir.path(),
            "content/posts/sharp.mdx",
            "---\ntitle: Sharp\ndate: 2024-05-01\ncategories: [\"C#\", CI/CD]\n---\nBody\n",
        );
        Generator::new(&blog).unwrap().generate().unwrap();
        let public = &blog.public_dir;

        let post = fs::read_to_string(public.join("posts/sharp/index.html")).unwrap();
        assert!(post.contains(r#"href="/categories/c%23""#));
        assert!(post.contains(r#"href="/categories/ci%2Fcd""#));

        let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("/categories/c%23</loc>"));
        assert!(sitemap.contains("/categories/ci%2Fcd</loc>"));

        // Requests are decoded before lookup, so the files live at the decoded paths
        assert!(public.join("categories/c#/index.html").is_file());
        assert!(public.join("categories/ci/cd/index.html").is_file());
    }

    #[test]
    fn test_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        Generator::new(&blog).unwrap().generate().unwrap();

        let home = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(home.contains("No posts yet. Check back soon!"));
        let categories =
            fs::read_to_string(blog.public_dir.join("categories/index.html")).unwrap();
        assert!(categories.contains("No categories found."));
    }

    #[test]
    fn test_regenerate_sees_edits() {
        let (dir, blog) = site();
        let generator = Generator::new(&blog).unwrap();
        generator.generate().unwrap();

        write(
            dir.path(),
            "content/about/index.mdx",
            "---\ntitle: About Me Again\n---\nUpdated\n",
        );
        generator.generate().unwrap();
        let html = fs::read_to_string(blog.public_dir.join("about/index.html")).unwrap();
        assert!(html.contains("About Me Again"));
    }
}

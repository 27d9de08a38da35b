//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Blog, CONFIG_FILE};

/// Quiet period before a burst of file events triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let generator = Generator::new(blog)?;
    generator.generate()?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate until the watcher shuts down
pub async fn watch(blog: &Blog) -> Result<()> {
    let blog = blog.clone();
    tokio::task::spawn_blocking(move || watch_sources(&blog, || {})).await?
}

/// Block on the content directory, static directory and config file,
/// regenerating after each debounced burst of changes.
///
/// `on_rebuild` runs after every successful rebuild. A failed rebuild is
/// logged and the previous output stays in place.
pub fn watch_sources<F: FnMut()>(blog: &Blog, mut on_rebuild: F) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    for dir in [&blog.content_dir, &blog.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = blog.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<&DebouncedEvent> =
                    events.iter().filter(|e| is_relevant(&e.path)).collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // A config edit can move directories, so reopen the blog
                let rebuilt = Blog::new(&blog.base_dir).and_then(|fresh| run(&fresh));
                match rebuilt {
                    Ok(()) => on_rebuild(),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(_) => break,
        }
    }

    Ok(())
}

/// Editor droppings and VCS metadata never trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_relevant_paths() {
        assert!(is_relevant(Path::new("/blog/content/posts/hello.mdx")));
        assert!(is_relevant(Path::new("/blog/folio.yml")));
        assert!(!is_relevant(Path::new("/blog/.git/index")));
        assert!(!is_relevant(Path::new("/blog/content/posts/hello.mdx~")));
        assert!(!is_relevant(Path::new("/blog/content/posts/.hello.mdx.swp")));
    }

    #[test]
    fn test_run_generates_into_public_dir() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("content/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("first.mdx"), "---\ntitle: First\n---\nBody\n").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        run(&blog).unwrap();
        assert!(blog.public_dir.join("posts/first/index.html").is_file());
    }
}

//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::{Blog, CONFIG_FILE};

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let stats = Generator::new(blog)?.generate()?;

    tracing::info!(
        "Generated {} posts, {} categories and {} static files in {:.2}s",
        stats.posts,
        stats.categories,
        stats.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                let paths: Vec<PathBuf> = events
                    .into_iter()
                    .map(|event| event.path)
                    .filter(|path| is_relevant(path))
                    .collect();
                if !paths.is_empty() {
                    let _ = tx.send(paths);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        },
    )?;

    let watched = [
        (blog.posts_dir.clone(), RecursiveMode::NonRecursive),
        (blog.static_dir.clone(), RecursiveMode::Recursive),
        (blog.base_dir.join(CONFIG_FILE), RecursiveMode::NonRecursive),
    ];
    for (path, mode) in &watched {
        if path.exists() {
            debouncer.watcher().watch(path, *mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let base_dir = blog.base_dir.clone();
    rebuild_on_changes(rx, |changed| {
        for path in changed {
            tracing::info!("File changed: {}", path.display());
        }
        // The config may have changed too
        let outcome = tokio::task::block_in_place(|| Blog::new(&base_dir).and_then(|b| run(&b)));
        if let Err(e) = outcome {
            tracing::error!("Generation failed: {:#}", e);
        }
    })
    .await;

    Ok(())
}

/// Call `rebuild` once per batch of changes until every sender is gone.
/// Batches that queued up while a rebuild ran are merged into the next one.
async fn rebuild_on_changes<F>(mut rx: mpsc::UnboundedReceiver<Vec<PathBuf>>, mut rebuild: F)
where
    F: FnMut(&[PathBuf]),
{
    while let Some(mut changed) = rx.recv().await {
        while let Ok(queued) = rx.try_recv() {
            changed.extend(queued);
        }
        changed.sort();
        changed.dedup();
        rebuild(&changed);
    }
}

/// Editor and OS droppings do not trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !(name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".swx")
        || name.starts_with(".#")
        || name == ".DS_Store"
        || path.components().any(|c| c.as_os_str() == ".git"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("/site/posts/log.mdx")));
        assert!(is_relevant(Path::new("/site/_config.yml")));
        assert!(!is_relevant(Path::new("/site/posts/log.mdx~")));
        assert!(!is_relevant(Path::new("/site/posts/.log.mdx.swp")));
        assert!(!is_relevant(Path::new("/site/static/.DS_Store")));
        assert!(!is_relevant(Path::new("/site/static/.git/HEAD")));
    }

    #[tokio::test]
    async fn test_queued_changes_are_merged() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(vec![PathBuf::from("posts/a.mdx")]).unwrap();
        tx.send(vec![PathBuf::from("posts/b.mdx"), PathBuf::from("posts/a.mdx")])
            .unwrap();
        drop(tx);

        let mut builds = Vec::new();
        rebuild_on_changes(rx, |changed| builds.push(changed.to_vec())).await;
        assert_eq!(
            builds,
            vec![vec![PathBuf::from("posts/a.mdx"), PathBuf::from("posts/b.mdx")]]
        );
    }

    #[tokio::test]
    async fn test_change_during_rebuild_triggers_another() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(vec![PathBuf::from("posts/a.mdx")]).unwrap();
        // A save that lands while the first rebuild is running
        let mut during_rebuild = Some(tx);

        let mut builds = Vec::new();
        rebuild_on_changes(rx, |changed| {
            if let Some(tx) = during_rebuild.take() {
                tx.send(vec![PathBuf::from("posts/b.mdx")]).unwrap();
            }
            builds.push(changed.to_vec());
        })
        .await;

        assert_eq!(
            builds,
            vec![
                vec![PathBuf::from("posts/a.mdx")],
                vec![PathBuf::from("posts/b.mdx")]
            ]
        );
    }
}

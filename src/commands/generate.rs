//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::{ContentLoader, SiteContent};
use crate::generator::Generator;
use crate::Folio;

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    build(folio).map(|_| ())
}

/// Load content, render every page and return what was rendered
pub fn build(folio: &Folio) -> Result<SiteContent> {
    let start = std::time::Instant::now();

    let content = ContentLoader::new(folio).load()?;
    tracing::info!(
        "Loaded {} posts and {} projects",
        content.posts.len(),
        content.projects.len()
    );

    let generator = Generator::new(folio)?;
    generator.generate(&content)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(content)
}

/// Watch for file changes and regenerate
pub fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch content directory
    if folio.content_dir.exists() {
        watcher.watch(&folio.content_dir, notify::RecursiveMode::Recursive)?;
    }

    // Watch static directory
    if folio.static_dir.exists() {
        watcher.watch(&folio.static_dir, notify::RecursiveMode::Recursive)?;
    }

    // Watch config file
    let config_path = folio.config_path();
    if config_path.exists() {
        watcher.watch(Path::new(&config_path), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    // Reload so config edits take effect
                    let result = Folio::new(&folio.base_dir).and_then(|f| run(&f));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

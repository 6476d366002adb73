//! Static assets: the embedded stylesheet and script, plus the site's own
//! `static/` directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const STYLE_CSS: &str = include_str!("assets/style.css");
const SITE_JS: &str = include_str!("assets/folio.js");

/// Write the embedded assets under `public_dir`
pub fn write_embedded(public_dir: &Path) -> Result<()> {
    for (relative, content) in [("css/style.css", STYLE_CSS), ("js/folio.js", SITE_JS)] {
        let dest = public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, content)?;
        tracing::debug!("Wrote asset: {:?}", dest);
    }
    Ok(())
}

/// Copy files from `static_dir` into `public_dir`, keeping relative paths.
///
/// Entries under a component starting with `_` or `.` are skipped.
pub fn copy_static(static_dir: &Path, public_dir: &Path) -> Result<usize> {
    if !static_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(static_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(static_dir)?;
        let should_skip = relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|s| s.starts_with('_') || s.starts_with('.'))
                .unwrap_or(false)
        });
        if should_skip {
            continue;
        }

        let dest = public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        copied += 1;
        tracing::debug!("Copied: {:?} -> {:?}", path, dest);
    }

    Ok(copied)
}

//! Create a new post or project

use anyhow::Result;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// What kind of content file to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EntryKind {
    #[default]
    Post,
    Project,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Post => write!(f, "post"),
            EntryKind::Project => write!(f, "project"),
        }
    }
}

impl EntryKind {
    fn dir(self) -> &'static str {
        match self {
            EntryKind::Post => "posts",
            EntryKind::Project => "projects",
        }
    }

    fn scaffold(self, title: &str, date: &str) -> String {
        // Quote the title so YAML punctuation survives
        let title = title.replace('"', "\\\"");
        match self {
            EntryKind::Post => format!(
                "---\ntitle: \"{}\"\ndate: {}\ntags: []\ncategory: General\nfeatured: false\n---\n\n",
                title, date
            ),
            EntryKind::Project => format!(
                "---\ntitle: \"{}\"\ntags: []\ncategory: ''\nfeatured: false\nlive_url:\ngithub_url:\nfeatures: []\n---\n\n",
                title
            ),
        }
    }
}

/// Create a content file from the scaffold for `kind`.
///
/// Fails if the target file already exists.
pub fn create_entry(folio: &Folio, title: &str, kind: EntryKind) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a file name", title);
    }

    let target_dir = folio.content_dir.join(kind.dir());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(&file_path, kind.scaffold(title, &date))?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

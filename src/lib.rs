//! folio-rs: a static site generator for a personal portfolio and blog
//!
//! Posts and projects are authored as markdown-subset files with YAML
//! front-matter, loaded once into immutable records, and rendered through
//! embedded Tera templates into a static site.

pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (posts, projects, about.md)
    pub content_dir: std::path::PathBuf,
    /// Files copied verbatim into the output
    pub static_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join("static");

        Ok(Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            public_dir,
        })
    }

    /// Path of the site configuration file
    pub fn config_path(&self) -> std::path::PathBuf {
        self.base_dir.join("_config.yml")
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post or project
    pub fn new_entry(&self, title: &str, kind: commands::new::EntryKind) -> Result<()> {
        commands::new::create_entry(self, title, kind).map(|_| ())
    }
}

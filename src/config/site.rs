//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::theme::ThemeMode;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: String,
    pub email: String,
    pub location: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Appearance
    pub default_theme: ThemeMode,
    pub menu: Vec<MenuItem>,
    pub social: Vec<SocialLink>,
    pub hero: HeroConfig,
    pub skills: Vec<Skill>,

    // Sections
    pub blog: BlogConfig,
    pub projects: ProjectsConfig,
    pub contact: ContactConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            tagline: String::new(),
            description: String::new(),
            keywords: Vec::new(),
            author: "John Doe".to_string(),
            email: String::new(),
            location: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            default_theme: ThemeMode::Light,
            menu: default_menu(),
            social: Vec::new(),
            hero: HeroConfig::default(),
            skills: Vec::new(),

            blog: BlogConfig::default(),
            projects: ProjectsConfig::default(),
            contact: ContactConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        for key in config.extra.keys() {
            tracing::warn!("Unknown config key `{}` is ignored", key);
        }
        Ok(config)
    }
}

fn default_menu() -> Vec<MenuItem> {
    [
        ("Home", "/"),
        ("Projects", "/projects/"),
        ("Blog", "/blog/"),
        ("About", "/about/"),
    ]
    .into_iter()
    .map(|(name, path)| MenuItem {
        name: name.to_string(),
        path: path.to_string(),
    })
    .collect()
}

/// Navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

/// Link to a social profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub username: String,
}

/// Home page hero with the typing effect
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub greeting: String,
    pub intro: String,
    pub roles: Vec<String>,
    pub typing_ms: u64,
    pub deleting_ms: u64,
    pub hold_ms: u64,
    pub cv_path: Option<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            greeting: "Welcome to my portfolio".to_string(),
            intro: String::new(),
            roles: Vec::new(),
            typing_ms: 100,
            deleting_ms: 50,
            hold_ms: 2000,
            cv_path: None,
        }
    }
}

/// Proficiency shown next to a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// An entry in the skills cloud
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub level: SkillLevel,
    pub category: String,
}

/// Blog section settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Posts shown in the home page "latest" strip
    pub latest_count: usize,
    pub words_per_minute: usize,
    pub default_category: String,
    pub tag_dir: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            latest_count: 3,
            words_per_minute: 200,
            default_category: "General".to_string(),
            tag_dir: "tags".to_string(),
        }
    }
}

/// Projects section settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Category buttons in display order; derived from content when empty
    pub categories: Vec<String>,
    pub featured_count: usize,
    pub category_dir: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            featured_count: 3,
            category_dir: "category".to_string(),
        }
    }
}

/// A choice in the contact form subject dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectOption {
    pub value: String,
    pub label: String,
}

/// Contact form settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Third-party form-submission endpoint the form posts to
    pub endpoint: String,
    pub subjects: Vec<SubjectOption>,
    /// Seconds before a success or error message clears
    pub status_reset_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        let subjects = [
            ("hiring", "Job Opportunity"),
            ("project", "Project Collaboration"),
            ("freelance", "Freelance Work"),
            ("question", "General Question"),
            ("other", "Other"),
        ]
        .into_iter()
        .map(|(value, label)| SubjectOption {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect();

        Self {
            endpoint: String::new(),
            subjects,
            status_reset_secs: 5,
        }
    }
}

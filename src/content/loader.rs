//! Content loader - loads posts, projects and pages from the content directory

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown;
use super::post::{first_paragraph, reading_time};
use super::{FrontMatter, Page, Post, Project};
use crate::Folio;

/// Everything the generator needs, loaded once per build
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    /// Newest first
    pub posts: Vec<Post>,
    /// By `order`, then title
    pub projects: Vec<Project>,
    pub about: Option<Page>,
}

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load posts, projects and the about page
    pub fn load(&self) -> Result<SiteContent> {
        Ok(SiteContent {
            posts: self.load_posts()?,
            projects: self.load_projects()?,
            about: self.load_about()?,
        })
    }

    /// Load all posts from content/posts
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for path in markdown_files(&self.folio.content_dir.join("posts")) {
            match self.load_post(&path) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        Ok(posts)
    }

    /// Load a single post; `None` for drafts
    fn load_post(&self, path: &Path) -> Result<Option<Post>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        if fm.draft {
            return Ok(None);
        }

        let config = &self.folio.config;
        let slug = file_slug(path);
        let title = fm.title.clone().unwrap_or_else(|| slug.clone());
        let date = fm.parse_date().unwrap_or_else(|| file_date(path));

        let (excerpt_md, raw) = markdown::split_excerpt(body);

        let mut post = Post::new(slug, title, date, raw);
        post.excerpt = fm
            .excerpt
            .or(excerpt_md)
            .or_else(|| first_paragraph(&post.nodes))
            .unwrap_or_default();
        post.reading_time = fm
            .reading_time
            .unwrap_or_else(|| reading_time(&post.raw, config.blog.words_per_minute));
        post.tags = fm.tags.into_iter().collect();
        post.category = fm
            .category
            .unwrap_or_else(|| config.blog.default_category.clone());
        post.featured = fm.featured;
        post.author = fm.author.unwrap_or_else(|| config.author.clone());
        post.source = self.relative_source(path);

        Ok(Some(post))
    }

    /// Load all projects from content/projects
    pub fn load_projects(&self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();

        for path in markdown_files(&self.folio.content_dir.join("projects")) {
            match self.load_project(&path) {
                Ok(Some(project)) => projects.push(project),
                Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                Err(e) => tracing::warn!("Failed to load project {:?}: {}", path, e),
            }
        }

        projects.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));

        Ok(projects)
    }

    fn load_project(&self, path: &Path) -> Result<Option<Project>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        if fm.draft {
            return Ok(None);
        }

        let slug = file_slug(path);
        let title = fm.title.clone().unwrap_or_else(|| slug.clone());

        let mut project = Project::new(slug, title, body);
        project.description = fm
            .description
            .or_else(|| first_paragraph(&project.body))
            .unwrap_or_default();
        project.challenge = fm.challenge.unwrap_or_default();
        project.solution = fm.solution.unwrap_or_default();
        project.features = fm.features;
        project.tags = fm.tags.into_iter().collect();
        project.category = fm.category.unwrap_or_default();
        project.live_url = fm.live_url;
        project.github_url = fm.github_url;
        project.image = fm.image;
        project.timeline = fm.timeline.unwrap_or_default();
        project.role = fm.role.unwrap_or_default();
        project.featured = fm.featured;
        project.order = fm.order.unwrap_or(i64::MAX);
        project.source = self.relative_source(path);

        Ok(Some(project))
    }

    /// Load content/about.md if present
    pub fn load_about(&self) -> Result<Option<Page>> {
        let path = self.folio.content_dir.join("about.md");
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        let mut page = Page::new(fm.title.unwrap_or_else(|| "About".to_string()), body);
        page.source = self.relative_source(&path);
        Ok(Some(page))
    }

    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.folio.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

/// Markdown files under `dir`, in path order
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markdown_file(p))
        .collect();
    files.sort();
    files
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn file_slug(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(slug::slugify)
        .unwrap_or_else(|| "untitled".to_string())
}

/// Modification date of a file, or today
fn file_date(path: &Path) -> NaiveDate {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| chrono::DateTime::<Local>::from(t).date_naive())
        .unwrap_or_else(|_| Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> (tempfile::TempDir, Folio) {
        let tmp = tempfile::tempdir().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        fs::create_dir_all(folio.content_dir.join("posts")).unwrap();
        fs::create_dir_all(folio.content_dir.join("projects")).unwrap();
        (tmp, folio)
    }

    #[test]
    fn test_load_posts_sorted_and_defaults() {
        let (_tmp, folio) = site();
        let posts_dir = folio.content_dir.join("posts");
        fs::write(
            posts_dir.join("older.md"),
            "---\ntitle: Older\ndate: 2025-12-05\ntags: [Git, Git, Teams]\n---\nFirst words here.\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("Newer Post.md"),
            "---\ntitle: Newer\ndate: 2026-01-05\nexcerpt: Custom\ncategory: Career\nreading_time: 8 min\n---\n## Heading\nBody\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("draft.md"),
            "---\ntitle: Draft\ndraft: true\n---\nSecret\n",
        )
        .unwrap();
        fs::write(posts_dir.join("notes.txt"), "ignored").unwrap();

        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "newer-post");
        assert_eq!(posts[0].excerpt, "Custom");
        assert_eq!(posts[0].category, "Career");
        assert_eq!(posts[0].reading_time, "8 min");
        assert_eq!(posts[0].headings, vec!["Heading"]);

        assert_eq!(posts[1].excerpt, "First words here.");
        assert_eq!(posts[1].category, "General");
        assert_eq!(posts[1].reading_time, "1 min");
        assert_eq!(posts[1].author, "John Doe");
        assert_eq!(posts[1].tags.len(), 2);
    }

    #[test]
    fn test_excerpt_from_more_marker() {
        let (_tmp, folio) = site();
        fs::write(
            folio.content_dir.join("posts/more.md"),
            "---\ntitle: More\ndate: 2026-01-01\n---\nTeaser line.\n<!-- more -->\nRest of it.\n",
        )
        .unwrap();

        let posts = ContentLoader::new(&folio).load_posts().unwrap();
        assert_eq!(posts[0].excerpt, "Teaser line.");
        assert_eq!(posts[0].nodes.len(), 2);
    }

    #[test]
    fn test_broken_post_is_skipped() {
        let (_tmp, folio) = site();
        fs::write(
            folio.content_dir.join("posts/bad.md"),
            "---\ntitle: [unclosed\n---\nBody\n",
        )
        .unwrap();
        assert!(ContentLoader::new(&folio).load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_load_projects_ordered() {
        let (_tmp, folio) = site();
        let dir = folio.content_dir.join("projects");
        fs::write(
            dir.join("b.md"),
            "---\ntitle: Beta\ncategory: Backend\n---\nBeta project.\n",
        )
        .unwrap();
        fs::write(
            dir.join("a.md"),
            "---\ntitle: Alpha\ncategory: Frontend\norder: 1\nfeatured: true\nfeatures: [Fast]\n---\nAlpha project.\n",
        )
        .unwrap();

        let projects = ContentLoader::new(&folio).load_projects().unwrap();
        assert_eq!(projects[0].title, "Alpha");
        assert!(projects[0].featured);
        assert_eq!(projects[0].features, vec!["Fast"]);
        assert_eq!(projects[1].description, "Beta project.");
    }

    #[test]
    fn test_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        let content = ContentLoader::new(&folio).load().unwrap();
        assert!(content.posts.is_empty());
        assert!(content.projects.is_empty());
        assert!(content.about.is_none());
    }

    #[test]
    fn test_load_about() {
        let (_tmp, folio) = site();
        fs::write(folio.content_dir.join("about.md"), "## Story\nI build things.\n").unwrap();
        let about = ContentLoader::new(&folio).load_about().unwrap().unwrap();
        assert_eq!(about.title, "About");
        assert_eq!(about.nodes.len(), 2);
    }
}

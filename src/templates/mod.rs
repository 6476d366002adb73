//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{MenuItem, SiteConfig, SkillLevel, SocialLink, SubjectOption};
use crate::content::{Post, Project};
use crate::helpers::{html_escape, nodes_to_html, toc_html, url_for};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("project.html", include_str!("site/project.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter(
            "url",
            UrlFilter {
                config: config.clone(),
            },
        );
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: prefix a site path with the configured root
struct UrlFilter {
    config: SiteConfig,
}

impl tera::Filter for UrlFilter {
    fn filter(
        &self,
        value: &tera::Value,
        _args: &HashMap<String, tera::Value>,
    ) -> tera::Result<tera::Value> {
        let path = tera::try_get_value!("url", "value", String, value);
        Ok(tera::Value::String(html_escape(&url_for(
            &self.config,
            &path,
        ))))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Tera filter: format a `YYYY-MM-DD` date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "short".to_string(),
    };

    let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") else {
        return Ok(tera::Value::String(s));
    };

    // "Jan 5, 2026" or "January 5, 2026"
    let formatted = match format.as_str() {
        "long" => date.format("%B %-d, %Y").to_string(),
        "short" => date.format("%b %-d, %Y").to_string(),
        other => date.format(other).to_string(),
    };
    Ok(tera::Value::String(formatted))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: String,
    pub email: String,
    pub location: String,
    pub language: String,
    pub url: String,
    pub theme: String,
    pub menu: Vec<MenuItem>,
    pub social: Vec<SocialLink>,
    pub year: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub reading_time: String,
    pub tags: Vec<String>,
    pub category: String,
    pub featured: bool,
    pub author: String,
    pub path: String,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            reading_time: post.reading_time.clone(),
            tags: post.tags.iter().cloned().collect(),
            category: post.category.clone(),
            featured: post.featured,
            author: post.author.clone(),
            path: format!("/{}", post.path()),
        }
    }
}

/// A post with its rendered body
#[derive(Debug, Clone, Serialize)]
pub struct PostPageData {
    #[serde(flatten)]
    pub post: PostData,
    pub content: String,
    pub toc: String,
}

impl From<&Post> for PostPageData {
    fn from(post: &Post) -> Self {
        Self {
            post: PostData::from(post),
            content: nodes_to_html(&post.nodes),
            toc: toc_html(&post.headings),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectData {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    pub path: String,
}

impl From<&Project> for ProjectData {
    fn from(project: &Project) -> Self {
        Self {
            slug: project.slug.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            tags: project.tags.iter().cloned().collect(),
            category: project.category.clone(),
            live_url: project.live_url.clone(),
            github_url: project.github_url.clone(),
            image: project.image.clone(),
            featured: project.featured,
            path: format!("/{}", project.path()),
        }
    }
}

/// A project with its rendered long description
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPageData {
    #[serde(flatten)]
    pub project: ProjectData,
    pub content: String,
    pub challenge: String,
    pub solution: String,
    pub features: Vec<String>,
    pub timeline: String,
    pub role: String,
}

impl From<&Project> for ProjectPageData {
    fn from(project: &Project) -> Self {
        Self {
            project: ProjectData::from(project),
            content: nodes_to_html(&project.body),
            challenge: project.challenge.clone(),
            solution: project.solution.clone(),
            features: project.features.clone(),
            timeline: project.timeline.clone(),
            role: project.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub title: String,
    pub path: String,
}

/// A filter button on a listing page
#[derive(Debug, Clone, Serialize)]
pub struct FilterLink {
    pub name: String,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillData {
    pub name: String,
    pub icon: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<SkillData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactData {
    pub endpoint: String,
    pub subjects: Vec<SubjectOption>,
    pub status_reset_secs: u64,
}

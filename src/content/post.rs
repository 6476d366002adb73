//! Post and Project models

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::Serialize;

use super::catalog::Listable;
use super::markdown::{self, DisplayNode};

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// URL-friendly name, taken from the file stem
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Publication date
    pub date: NaiveDate,

    /// Human reading time, e.g. "5 min"
    pub reading_time: String,

    /// Post tags
    pub tags: IndexSet<String>,

    /// Post category
    pub category: String,

    /// Whether the post is highlighted on the blog index
    pub featured: bool,

    /// Author name
    pub author: String,

    /// Raw body text
    pub raw: String,

    /// Rendered body
    pub nodes: Vec<DisplayNode>,

    /// Table of contents entries
    pub headings: Vec<String>,

    /// Source file path (relative)
    pub source: String,
}

impl Post {
    /// Create a new post from its body, deriving nodes and headings
    pub fn new(slug: String, title: String, date: NaiveDate, raw: String) -> Self {
        let nodes = markdown::render(&raw);
        let headings = markdown::extract_headings(&raw);
        Self {
            slug,
            title,
            excerpt: String::new(),
            date,
            reading_time: String::new(),
            tags: IndexSet::new(),
            category: String::new(),
            featured: false,
            author: String::new(),
            raw,
            nodes,
            headings,
            source: String::new(),
        }
    }

    /// URL path of the post page
    pub fn path(&self) -> String {
        format!("blog/{}/", self.slug)
    }

    /// Get the previous (newer) post in a list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next (older) post in a list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}

impl Listable for Post {
    fn id(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.excerpt
    }

    fn tags(&self) -> &IndexSet<String> {
        &self.tags
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn featured(&self) -> bool {
        self.featured
    }
}

/// A portfolio project
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub slug: String,
    pub title: String,

    /// One-line description used in cards
    pub description: String,

    /// Rendered long description
    pub body: Vec<DisplayNode>,

    pub challenge: String,
    pub solution: String,
    pub features: Vec<String>,
    pub tags: IndexSet<String>,
    pub category: String,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub image: Option<String>,
    pub timeline: String,
    pub role: String,
    pub featured: bool,

    /// Position in listings, lower first
    pub order: i64,

    /// Source file path (relative)
    pub source: String,
}

impl Project {
    pub fn new(slug: String, title: String, raw: &str) -> Self {
        Self {
            slug,
            title,
            description: String::new(),
            body: markdown::render(raw),
            challenge: String::new(),
            solution: String::new(),
            features: Vec::new(),
            tags: IndexSet::new(),
            category: String::new(),
            live_url: None,
            github_url: None,
            image: None,
            timeline: String::new(),
            role: String::new(),
            featured: false,
            order: 0,
            source: String::new(),
        }
    }

    /// URL path of the project page
    pub fn path(&self) -> String {
        format!("projects/{}/", self.slug)
    }

    pub fn prev<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        let pos = projects.iter().position(|p| p.slug == self.slug)?;
        pos.checked_sub(1).map(|i| &projects[i])
    }

    pub fn next<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        let pos = projects.iter().position(|p| p.slug == self.slug)?;
        projects.get(pos + 1)
    }
}

impl Listable for Project {
    fn id(&self) -> &str {
        &self.slug
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &IndexSet<String> {
        &self.tags
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn featured(&self) -> bool {
        self.featured
    }
}

/// A standalone page such as About
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    pub nodes: Vec<DisplayNode>,
    pub source: String,
}

impl Page {
    pub fn new(title: String, raw: &str) -> Self {
        Self {
            title,
            nodes: markdown::render(raw),
            source: String::new(),
        }
    }
}

/// Plain text of the first paragraph, used when no summary is given
pub fn first_paragraph(nodes: &[DisplayNode]) -> Option<String> {
    nodes.iter().find_map(|node| match node {
        DisplayNode::Paragraph { spans } => {
            Some(spans.iter().map(|span| span.text.as_str()).collect())
        }
        _ => None,
    })
}

/// Estimate reading time for a body at `words_per_minute`
pub fn reading_time(raw: &str, words_per_minute: usize) -> String {
    let words = raw.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1)).max(1);
    format!("{} min", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str) -> Post {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        Post::new(slug.to_string(), slug.to_uppercase(), date, String::new())
    }

    #[test]
    fn test_post_derives_nodes_and_headings() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let post = Post::new(
            "rsc".to_string(),
            "RSC".to_string(),
            date,
            "## Intro\nText\n## Outro".to_string(),
        );
        assert_eq!(post.nodes.len(), 3);
        assert_eq!(post.headings, vec!["Intro", "Outro"]);
        assert_eq!(post.path(), "blog/rsc/");
    }

    #[test]
    fn test_prev_next() {
        let posts = vec![post("a"), post("b"), post("c")];
        assert!(posts[0].prev(&posts).is_none());
        assert_eq!(posts[0].next(&posts).map(|p| p.slug.as_str()), Some("b"));
        assert_eq!(posts[2].prev(&posts).map(|p| p.slug.as_str()), Some("b"));
        assert!(posts[2].next(&posts).is_none());
        assert!(post("z").next(&posts).is_none());
    }

    #[test]
    fn test_first_paragraph() {
        let nodes = markdown::render("## Title\n- item\nUse `cargo` **daily**.\nSecond.");
        assert_eq!(
            first_paragraph(&nodes),
            Some("Use cargo daily.".to_string())
        );
        assert_eq!(first_paragraph(&markdown::render("## Only")), None);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time("", 200), "1 min");
        let body = "word ".repeat(401);
        assert_eq!(reading_time(&body, 200), "3 min");
        assert_eq!(reading_time("a b c", 0), "3 min");
    }
}

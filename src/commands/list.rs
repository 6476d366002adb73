//! List site content

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::catalog::categories;
use crate::content::loader::ContentLoader;
use crate::content::{filter, FilterState, Listable};
use crate::Folio;

/// Narrowing options from the command line
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub category: Option<String>,
}

impl ListOptions {
    fn filter_state(&self) -> FilterState {
        let mut state = FilterState::new();
        if let Some(query) = &self.query {
            state.set_query(query);
        }
        if let Some(tag) = &self.tag {
            state.toggle_tag(tag);
        }
        if let Some(category) = &self.category {
            state.select_category(category);
        }
        state
    }
}

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, options: &ListOptions) -> Result<()> {
    for line in render(folio, content_type, options)? {
        println!("{}", line);
    }
    Ok(())
}

/// The listing as printable lines
pub fn render(folio: &Folio, content_type: &str, options: &ListOptions) -> Result<Vec<String>> {
    let loader = ContentLoader::new(folio);
    let state = options.filter_state();
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            let matching = filter(&posts, &state);
            lines.push(format!("Posts ({}):", matching.len()));
            for post in matching {
                lines.push(format!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.source
                ));
            }
        }
        "project" | "projects" => {
            let projects = loader.load_projects()?;
            let matching = filter(&projects, &state);
            lines.push(format!("Projects ({}):", matching.len()));
            for project in matching {
                lines.push(format!(
                    "  {}{} ({}) [{}]",
                    if project.featured { "* " } else { "" },
                    project.title,
                    project.category,
                    project.source
                ));
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts()?;
            let projects = loader.load_projects()?;
            let mut counts: IndexMap<String, usize> = IndexMap::new();
            for tags in posts
                .iter()
                .map(Listable::tags)
                .chain(projects.iter().map(Listable::tags))
            {
                for tag in tags {
                    *counts.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            lines.push(format!("Tags ({}):", counts.len()));
            let mut counts: Vec<_> = counts.into_iter().collect();
            // Stable: ties keep first-seen order
            counts.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in counts {
                lines.push(format!("  {} ({})", tag, count));
            }
        }
        "category" | "categories" => {
            let projects = loader.load_projects()?;
            let names = categories(&projects);
            lines.push(format!("Categories ({}):", names.len()));
            for name in names {
                let count = filter(&projects, &FilterState::with_category(&name)).len();
                lines.push(format!("  {} ({})", name, count));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, project, tag, category",
                content_type
            );
        }
    }

    Ok(lines)
}

//! Content module - posts, projects, rendering and catalog filtering

pub mod catalog;
mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;

pub use catalog::{filter, CatalogEntry, FilterState, Listable};
pub use frontmatter::FrontMatter;
pub use markdown::{extract_headings, heading_anchor, render, DisplayNode, InlineSpan, SpanKind};
pub use post::{first_paragraph, reading_time, Page, Post, Project};

//! Catalog filtering for blog and project listings

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Category selection that matches every entry
pub const ALL_CATEGORIES: &str = "All";

/// Read-only view of a listable item (blog post or project)
pub trait Listable {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn summary(&self) -> &str;
    fn tags(&self) -> &IndexSet<String>;
    fn category(&self) -> &str;
    fn featured(&self) -> bool;
}

impl<T: Listable + ?Sized> Listable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn summary(&self) -> &str {
        (**self).summary()
    }

    fn tags(&self) -> &IndexSet<String> {
        (**self).tags()
    }

    fn category(&self) -> &str {
        (**self).category()
    }

    fn featured(&self) -> bool {
        (**self).featured()
    }
}

/// A plain catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub tags: IndexSet<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured: bool,
}

impl CatalogEntry {
    /// Snapshot any listable item
    pub fn from_listable<T: Listable>(item: &T) -> Self {
        Self {
            id: item.id().to_string(),
            title: item.title().to_string(),
            summary: item.summary().to_string(),
            tags: item.tags().clone(),
            category: item.category().to_string(),
            featured: item.featured(),
        }
    }
}

impl Listable for CatalogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.summary
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

/// Current query and selections narrowing a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub query: String,
    pub selected_tag: Option<String>,
    pub selected_category: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with a single tag selected
    pub fn with_tag(tag: &str) -> Self {
        Self {
            selected_tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    /// State with a single category selected
    pub fn with_category(category: &str) -> Self {
        Self {
            selected_category: Some(category.to_string()),
            ..Self::default()
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Select a tag, or clear the selection if it is already selected
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.selected_tag.as_deref() == Some(tag) {
            self.selected_tag = None;
        } else {
            self.selected_tag = Some(tag.to_string());
        }
    }

    pub fn select_category(&mut self, category: &str) {
        self.selected_category = Some(category.to_string());
    }

    /// Reset to no query and no selections
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        self.query.is_empty() && self.selected_tag.is_none() && !self.has_category()
    }

    fn has_category(&self) -> bool {
        matches!(self.selected_category.as_deref(), Some(c) if c != ALL_CATEGORIES)
    }

    /// Whether an entry passes the text, tag and category conditions
    pub fn matches<T: Listable>(&self, entry: &T) -> bool {
        self.matches_text(entry) && self.matches_tag(entry) && self.matches_category(entry)
    }

    fn matches_text<T: Listable>(&self, entry: &T) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        entry.title().to_lowercase().contains(&query)
            || entry.summary().to_lowercase().contains(&query)
            || entry.tags().iter().any(|tag| tag.to_lowercase() == query)
    }

    fn matches_tag<T: Listable>(&self, entry: &T) -> bool {
        match &self.selected_tag {
            Some(tag) => entry.tags().contains(tag),
            None => true,
        }
    }

    fn matches_category<T: Listable>(&self, entry: &T) -> bool {
        match self.selected_category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => entry.category() == category,
        }
    }
}

/// Entries passing `state`, in their original order
pub fn filter<'a, T: Listable>(entries: &'a [T], state: &FilterState) -> Vec<&'a T> {
    if state.is_default() {
        return entries.iter().collect();
    }
    entries.iter().filter(|entry| state.matches(*entry)).collect()
}

/// Distinct tags in first-seen order
pub fn all_tags<T: Listable>(entries: &[T]) -> Vec<String> {
    let tags: IndexSet<&String> = entries.iter().flat_map(|e| e.tags().iter()).collect();
    tags.into_iter().cloned().collect()
}

/// The "All" sentinel followed by distinct categories in first-seen order
pub fn categories<T: Listable>(entries: &[T]) -> Vec<String> {
    let mut seen: IndexSet<String> = IndexSet::new();
    seen.insert(ALL_CATEGORIES.to_string());
    for entry in entries {
        if !entry.category().is_empty() {
            seen.insert(entry.category().to_string());
        }
    }
    seen.into_iter().collect()
}

/// Split into (featured, regular), keeping order within each half
pub fn partition_featured<T: Listable>(entries: &[T]) -> (Vec<&T>, Vec<&T>) {
    entries.iter().partition(|entry| entry.featured())
}

/// Typeahead suggestions: tags and titles starting with `prefix`
pub fn suggest<T: Listable>(entries: &[T], prefix: &str, limit: usize) -> Vec<String> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }

    let mut suggestions: IndexSet<&str> = IndexSet::new();
    for entry in entries {
        for tag in entry.tags() {
            if tag.to_lowercase().starts_with(&prefix) {
                suggestions.insert(tag.as_str());
            }
        }
        if entry.title().to_lowercase().starts_with(&prefix) {
            suggestions.insert(entry.title());
        }
    }

    suggestions
        .into_iter()
        .take(limit)
        .map(str::to_string)
        .collect()
}

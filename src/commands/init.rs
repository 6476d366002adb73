//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: My Portfolio
tagline: Building thoughtful software
description: Projects and writing
keywords: [portfolio, blog]
author: John Doe
email: hello@example.com
location: Earth
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public

# Appearance
default_theme: light

menu:
  - name: Home
    path: /
  - name: Projects
    path: /projects/
  - name: Blog
    path: /blog/
  - name: About
    path: /about/
  - name: Contact
    path: /contact/

social:
  - label: GitHub
    href: https://github.com/example
    username: example

hero:
  greeting: Hi, I'm
  intro: I build web applications and write about what I learn.
  roles:
    - Full-Stack Developer
    - Problem Solver
  typing_ms: 100
  deleting_ms: 50
  hold_ms: 2000

skills:
  - name: Rust
    level: Advanced
    category: Backend
  - name: TypeScript
    level: Expert
    category: Frontend

blog:
  latest_count: 3
  words_per_minute: 200

projects:
  featured_count: 3

contact:
  # Third-party form endpoint; the dev server's /api/contact is used when empty
  endpoint: ''
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
date: {date}
excerpt: A first post to show how writing works.
tags: [Intro, Writing]
category: General
featured: true
---

Welcome to your new site. Posts live in `content/posts` and use a small,
predictable markdown subset.

<!-- more -->

## Writing posts

Paragraphs may contain `inline code` and **bold text**.

- Unordered items start with a dash
- Each item is one line

1. Ordered items use a number
2. Up to four per list

## Code blocks

```rust
fn main() {
    println!("Hello, world!");
}
```
"#;

const SAMPLE_PROJECT: &str = r#"---
title: Portfolio Site
description: The site you are looking at, generated from markdown.
tags: [Rust, Static Site]
category: Full-Stack
featured: true
order: 1
role: Author
timeline: 2 weeks
challenge: Keep authoring simple without a full markdown engine.
solution: A small line-based renderer with structured output.
features:
  - Live reload while writing
  - Tag and category pages
github_url: https://github.com/example/portfolio
---

This project turns a folder of markdown files into a complete portfolio.

## Highlights

- Light and dark themes
- Search index for every post and project
"#;

const ABOUT: &str = r#"---
title: About
---

I am a developer who enjoys **clean code** and clear writing.

## Background

Tell visitors who you are and what you are working on.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/projects"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    write_if_missing(
        &target_dir.join("content/posts/hello-world.md"),
        &SAMPLE_POST.replace("{date}", &today),
    )?;
    write_if_missing(
        &target_dir.join("content/projects/portfolio-site.md"),
        SAMPLE_PROJECT,
    )?;
    write_if_missing(&target_dir.join("content/about.md"), ABOUT)?;

    Ok(())
}

/// Existing files are left alone so init can be re-run safely
fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::warn!("Skipping existing file: {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::FrontMatter;

    #[test]
    fn test_init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("content/posts/hello-world.md").exists());
        assert!(dir.path().join("content/projects/portfolio-site.md").exists());
        assert!(dir.path().join("content/about.md").exists());
    }

    #[test]
    fn test_scaffold_parses() {
        let config: SiteConfig = serde_yaml::from_str(CONFIG).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.hero.roles.len(), 2);

        let (fm, _) = FrontMatter::parse(SAMPLE_PROJECT).unwrap();
        assert_eq!(fm.features.len(), 2);
        assert_eq!(fm.order, Some(1));
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let config = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}

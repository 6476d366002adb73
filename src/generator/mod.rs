//! Generator module - generates static HTML files using built-in Tera templates

use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use std::fs;
use std::path::PathBuf;

use tera::Context;

use crate::content::catalog::{self, all_tags, categories, partition_featured, ALL_CATEGORIES};
use crate::content::loader::SiteContent;
use crate::content::{CatalogEntry, FilterState, Post, Project};
use crate::helpers::{full_url_for, meta_generator, nodes_to_html, open_graph, Typewriter};
use crate::templates::{
    ContactData, FilterLink, NavLink, PostData, PostPageData, ProjectData, ProjectPageData,
    SiteData, SkillData, SkillGroup, TemplateRenderer,
};
use crate::theme;
use crate::Folio;

/// Where the contact form posts when no third-party endpoint is configured
pub const LOCAL_CONTACT_ENDPOINT: &str = "/api/contact";

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new(&folio.config)?;

        Ok(Self {
            folio: folio.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, content: &SiteContent) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;

        theme::assets::write_embedded(&self.folio.public_dir)?;
        let copied = theme::assets::copy_static(&self.folio.static_dir, &self.folio.public_dir)?;
        tracing::debug!("Copied {} static files", copied);

        let site_data = self.build_site_data();

        self.generate_home(content, &site_data)?;
        self.generate_about(content, &site_data)?;
        self.generate_project_pages(&content.projects, &site_data)?;
        self.generate_blog_pages(&content.posts, &site_data)?;
        self.generate_contact_page(&site_data)?;
        self.generate_not_found_page(&site_data)?;
        self.generate_search_index(content)?;
        self.generate_atom_feed(&content.posts)?;

        Ok(())
    }

    /// Build site data for templates
    fn build_site_data(&self) -> SiteData {
        let config = &self.folio.config;
        SiteData {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            keywords: config.keywords.clone(),
            author: config.author.clone(),
            email: config.email.clone(),
            location: config.location.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            theme: theme::current().to_string(),
            menu: config.menu.clone(),
            social: config.social.clone(),
            year: chrono::Local::now().format("%Y").to_string(),
        }
    }

    /// Skills grouped by category, in first-seen order
    fn build_skill_groups(&self) -> Vec<SkillGroup> {
        let mut groups: IndexMap<String, Vec<SkillData>> = IndexMap::new();
        for skill in &self.folio.config.skills {
            groups
                .entry(skill.category.clone())
                .or_default()
                .push(SkillData {
                    name: skill.name.clone(),
                    icon: skill.icon.clone(),
                    level: skill.level,
                });
        }

        groups
            .into_iter()
            .map(|(category, skills)| SkillGroup { category, skills })
            .collect()
    }

    /// Create a base context with common variables
    fn create_base_context(
        &self,
        site_data: &SiteData,
        current_path: &str,
        title: &str,
        description: &str,
    ) -> Context {
        let config = &self.folio.config;
        let description = if description.is_empty() {
            config.description.as_str()
        } else {
            description
        };
        let og_title = if title.is_empty() {
            config.title.as_str()
        } else {
            title
        };

        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("current_path", current_path);
        context.insert("page_title", title);
        context.insert("page_description", description);
        context.insert("meta_generator", &meta_generator());
        context.insert(
            "open_graph",
            &open_graph(
                og_title,
                description,
                &full_url_for(config, current_path),
                None,
                &config.title,
            ),
        );
        context
    }

    /// Render a template and write it under the public directory
    fn write_page(&self, relative: &str, template: &str, context: &Context) -> Result<PathBuf> {
        let html = self.renderer.render(template, context)?;

        let relative = relative.trim_start_matches('/');
        let output_path = if relative.is_empty() || relative.ends_with('/') {
            self.folio.public_dir.join(relative).join("index.html")
        } else {
            self.folio.public_dir.join(relative)
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(output_path)
    }

    /// Generate the home page
    fn generate_home(&self, content: &SiteContent, site_data: &SiteData) -> Result<()> {
        let config = &self.folio.config;

        let frames = Typewriter::from_config(&config.hero).rotation();
        // Keep the embedded JSON from closing its <script> element early
        let hero_frames = serde_json::to_string(&frames)?.replace("</", "<\\/");
        let hero_initial = config.hero.roles.first().cloned().unwrap_or_default();

        let (featured, _) = partition_featured(&content.projects);
        let featured_projects: Vec<ProjectData> = featured
            .into_iter()
            .take(config.projects.featured_count)
            .map(ProjectData::from)
            .collect();
        let latest_posts: Vec<PostData> = content
            .posts
            .iter()
            .take(config.blog.latest_count)
            .map(PostData::from)
            .collect();

        let mut context = self.create_base_context(site_data, "/", "", &config.tagline);
        context.insert("hero", &config.hero);
        context.insert("hero_frames", &hero_frames);
        context.insert("hero_initial", &hero_initial);
        context.insert("featured_projects", &featured_projects);
        context.insert("latest_posts", &latest_posts);
        context.insert("skill_groups", &self.build_skill_groups());

        self.write_page("/", "home.html", &context)?;
        Ok(())
    }

    /// Generate the about page
    fn generate_about(&self, content: &SiteContent, site_data: &SiteData) -> Result<()> {
        let (title, body) = match &content.about {
            Some(page) => (page.title.clone(), nodes_to_html(&page.nodes)),
            None => ("About".to_string(), String::new()),
        };

        let mut context = self.create_base_context(site_data, "/about/", &title, "");
        context.insert("content", &body);
        context.insert("skill_groups", &self.build_skill_groups());

        self.write_page("/about/", "about.html", &context)?;
        Ok(())
    }

    /// Generate the project index, one page per category and each project
    fn generate_project_pages(&self, projects: &[Project], site_data: &SiteData) -> Result<()> {
        let category_dir = &self.folio.config.projects.category_dir;
        let mut names = categories(projects);
        for extra in &self.folio.config.projects.categories {
            if !names.contains(extra) {
                names.push(extra.clone());
            }
        }

        let slugs = unique_slugs(names.iter().filter(|name| *name != ALL_CATEGORIES));
        let mut pages: Vec<(String, String)> =
            vec![(ALL_CATEGORIES.to_string(), "/projects/".to_string())];
        pages.extend(
            slugs
                .iter()
                .map(|(name, slug)| (name.clone(), format!("/projects/{}/{}/", category_dir, slug))),
        );

        for (name, path) in &pages {
            let state = FilterState::with_category(name);
            let matching: Vec<ProjectData> = catalog::filter(projects, &state)
                .into_iter()
                .map(ProjectData::from)
                .collect();

            let filters: Vec<FilterLink> = pages
                .iter()
                .map(|(other, other_path)| FilterLink {
                    name: other.clone(),
                    path: other_path.clone(),
                    active: other == name,
                })
                .collect();

            let title = if name == ALL_CATEGORIES {
                "Projects".to_string()
            } else {
                format!("Projects: {}", name)
            };

            let mut context = self.create_base_context(site_data, path, &title, "");
            context.insert("projects", &matching);
            context.insert("filters", &filters);
            let selected = if name == ALL_CATEGORIES { "" } else { name.as_str() };
            context.insert("selected_category", selected);
            self.write_page(path, "projects.html", &context)?;
        }

        for project in projects {
            let page = ProjectPageData::from(project);
            let path = format!("/{}", project.path());
            let mut context =
                self.create_base_context(site_data, &path, &project.title, &project.description);
            context.insert("project", &page);
            if let Some(prev) = project.prev(projects) {
                context.insert("prev", &nav_link(&prev.title, &prev.path()));
            }
            if let Some(next) = project.next(projects) {
                context.insert("next", &nav_link(&next.title, &next.path()));
            }
            self.write_page(&path, "project.html", &context)?;
        }

        tracing::info!(
            "Generated {} project pages in {} categories",
            projects.len(),
            slugs.len()
        );
        Ok(())
    }

    /// Generate the blog index, one page per tag and each post
    fn generate_blog_pages(&self, posts: &[Post], site_data: &SiteData) -> Result<()> {
        let tag_dir = &self.folio.config.blog.tag_dir;
        let tags = all_tags(posts);
        let slugs = unique_slugs(tags.iter());

        let tag_path = |slug: &str| format!("/blog/{}/{}/", tag_dir, slug);
        let filter_links = |active: Option<&str>| -> Vec<FilterLink> {
            let mut links = vec![FilterLink {
                name: ALL_CATEGORIES.to_string(),
                path: "/blog/".to_string(),
                active: active.is_none(),
            }];
            links.extend(slugs.iter().map(|(tag, slug)| FilterLink {
                name: tag.clone(),
                path: tag_path(slug.as_str()),
                active: active == Some(tag.as_str()),
            }));
            links
        };

        let (featured, regular) = partition_featured(posts);
        let mut context = self.create_base_context(site_data, "/blog/", "Blog", "");
        context.insert(
            "featured_posts",
            &featured.into_iter().map(PostData::from).collect::<Vec<_>>(),
        );
        context.insert(
            "posts",
            &regular.into_iter().map(PostData::from).collect::<Vec<_>>(),
        );
        context.insert("filters", &filter_links(None));
        context.insert("selected_tag", "");
        self.write_page("/blog/", "blog.html", &context)?;

        for (tag, slug) in &slugs {
            let state = FilterState::with_tag(tag);
            let tagged: Vec<PostData> = catalog::filter(posts, &state)
                .into_iter()
                .map(PostData::from)
                .collect();

            let path = tag_path(slug.as_str());
            let title = format!("Posts tagged {}", tag);
            let mut context = self.create_base_context(site_data, &path, &title, "");
            context.insert("featured_posts", &Vec::<PostData>::new());
            context.insert("posts", &tagged);
            context.insert("filters", &filter_links(Some(tag.as_str())));
            context.insert("selected_tag", tag);
            self.write_page(&path, "blog.html", &context)?;
        }

        for post in posts {
            let page = PostPageData::from(post);
            let path = format!("/{}", post.path());
            let mut context =
                self.create_base_context(site_data, &path, &post.title, &post.excerpt);
            context.insert("post", &page);
            if let Some(prev) = post.prev(posts) {
                context.insert("prev", &nav_link(&prev.title, &prev.path()));
            }
            if let Some(next) = post.next(posts) {
                context.insert("next", &nav_link(&next.title, &next.path()));
            }
            self.write_page(&path, "post.html", &context)?;
        }

        tracing::info!("Generated {} posts and {} tag pages", posts.len(), slugs.len());
        Ok(())
    }

    /// Generate the contact page
    fn generate_contact_page(&self, site_data: &SiteData) -> Result<()> {
        let contact = &self.folio.config.contact;
        let endpoint = if contact.endpoint.trim().is_empty() {
            LOCAL_CONTACT_ENDPOINT.to_string()
        } else {
            contact.endpoint.clone()
        };

        let mut context = self.create_base_context(site_data, "/contact/", "Contact", "");
        context.insert(
            "contact",
            &ContactData {
                endpoint,
                subjects: contact.subjects.clone(),
                status_reset_secs: contact.status_reset_secs,
            },
        );
        self.write_page("/contact/", "contact.html", &context)?;
        Ok(())
    }

    /// Generate the not-found page
    fn generate_not_found_page(&self, site_data: &SiteData) -> Result<()> {
        let context = self.create_base_context(site_data, "/404.html", "Page not found", "");
        self.write_page("404.html", "404.html", &context)?;
        Ok(())
    }

    /// Generate search index (JSON)
    fn generate_search_index(&self, content: &SiteContent) -> Result<()> {
        let index = search_index(content);

        let output_path = self.folio.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&index)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Generate Atom feed
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let base_url = config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            escape_xml(&full_url_for(config, "/atom.xml"))
        ));
        feed.push_str(&format!(
            "  <link href=\"{}\"/>\n",
            escape_xml(&full_url_for(config, "/"))
        ));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", escape_xml(base_url)));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        // Include recent posts (limit to 20)
        for post in posts.iter().take(20) {
            let link = escape_xml(&full_url_for(config, &post.path()));
            let published = post.date.format("%Y-%m-%dT00:00:00Z");
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!("    <published>{}</published>\n", published));
            feed.push_str(&format!("    <updated>{}</updated>\n", published));
            for tag in &post.tags {
                feed.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(tag)));
            }
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&strip_invalid_xml_chars(&post.excerpt))
            ));
            let body = strip_invalid_xml_chars(&nodes_to_html(&post.nodes));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                body.replace("]]>", "]]]]><![CDATA[>")
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.folio.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }
}

/// A distinct, non-empty URL slug for each name, in order.
///
/// Names whose slugs collide get `-2`, `-3`, ... appended; names that
/// slugify to nothing get no page.
fn unique_slugs<'a>(names: impl IntoIterator<Item = &'a String>) -> IndexMap<String, String> {
    let mut slugs: IndexMap<String, String> = IndexMap::new();
    let mut taken: IndexSet<String> = IndexSet::new();

    for name in names {
        let base = slug::slugify(name);
        if base.is_empty() || slugs.contains_key(name) {
            continue;
        }

        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        taken.insert(candidate.clone());
        slugs.insert(name.clone(), candidate);
    }

    slugs
}

fn nav_link(title: &str, path: &str) -> NavLink {
    NavLink {
        title: title.to_string(),
        path: format!("/{}", path.trim_start_matches('/')),
    }
}

/// Catalog entries for posts and projects, as written to `search.json`
pub fn search_index(content: &SiteContent) -> serde_json::Value {
    let entries = |items: Vec<(CatalogEntry, String)>| -> Vec<serde_json::Value> {
        items
            .into_iter()
            .map(|(entry, path)| {
                serde_json::json!({
                    "id": entry.id,
                    "title": entry.title,
                    "summary": entry.summary,
                    "tags": entry.tags,
                    "category": entry.category,
                    "featured": entry.featured,
                    "url": path,
                })
            })
            .collect()
    };

    let posts = content
        .posts
        .iter()
        .map(|p| (CatalogEntry::from_listable(p), format!("/{}", p.path())))
        .collect();
    let projects = content
        .projects
        .iter()
        .map(|p| (CatalogEntry::from_listable(p), format!("/{}", p.path())))
        .collect();

    serde_json::json!({
        "posts": entries(posts),
        "projects": entries(projects),
    })
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_content() -> SiteContent {
        let mut post = Post::new(
            "hello".to_string(),
            "Hello".to_string(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            "## Intro\nSome text".to_string(),
        );
        post.tags.insert("rust".to_string());
        let project = Project::new("site".to_string(), "Site".to_string(), "A site");

        SiteContent {
            posts: vec![post],
            projects: vec![project],
            about: None,
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & <b>"), "a &amp; &lt;b&gt;");
    }

    #[test]
    fn test_strip_invalid_xml_chars() {
        assert_eq!(strip_invalid_xml_chars("ok\u{0008}\tyes"), "ok\tyes");
    }

    #[test]
    fn test_search_index() {
        let index = search_index(&sample_content());
        assert_eq!(index["posts"][0]["url"], "/blog/hello/");
        assert_eq!(index["posts"][0]["tags"][0], "rust");
        assert_eq!(index["projects"][0]["id"], "site");
    }

    #[test]
    fn test_generate_writes_pages() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let generator = Generator::new(&folio).unwrap();
        generator.generate(&sample_content()).unwrap();

        let public = &folio.public_dir;
        for file in [
            "index.html",
            "about/index.html",
            "projects/index.html",
            "projects/site/index.html",
            "blog/index.html",
            "blog/tags/rust/index.html",
            "blog/hello/index.html",
            "contact/index.html",
            "404.html",
            "search.json",
            "atom.xml",
            "css/style.css",
            "js/folio.js",
        ] {
            assert!(public.join(file).exists(), "missing {}", file);
        }

        let post = fs::read_to_string(public.join("blog/hello/index.html")).unwrap();
        assert!(post.contains(r#"<h2 id="intro">Intro</h2>"#));
        assert!(post.contains("#intro"));

        let contact = fs::read_to_string(public.join("contact/index.html")).unwrap();
        assert!(contact.contains(r#"action="/api/contact""#));
    }

    fn post(slug: &str, tags: &[&str]) -> Post {
        let mut post = Post::new(
            slug.to_string(),
            slug.to_uppercase(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            "Body".to_string(),
        );
        post.tags = tags.iter().map(|t| t.to_string()).collect();
        post
    }

    fn generate(folio: &Folio, content: &SiteContent) {
        Generator::new(folio).unwrap().generate(content).unwrap();
    }

    #[test]
    fn test_unique_slugs() {
        let names: Vec<String> = ["C", "C++", "c", "!!!", "Web Apps"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let slugs = unique_slugs(names.iter());
        assert_eq!(slugs.get("C").map(String::as_str), Some("c"));
        assert_eq!(slugs.get("C++").map(String::as_str), Some("c-2"));
        assert_eq!(slugs.get("c").map(String::as_str), Some("c-3"));
        assert_eq!(slugs.get("Web Apps").map(String::as_str), Some("web-apps"));
        assert!(!slugs.contains_key("!!!"));
    }

    #[test]
    fn test_colliding_tags_get_their_own_pages() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let content = SiteContent {
            posts: vec![post("plain", &["C"]), post("plus", &["C++"]), post("odd", &["???"])],
            projects: Vec::new(),
            about: None,
        };
        generate(&folio, &content);

        let tags = folio.public_dir.join("blog/tags");
        let c = fs::read_to_string(tags.join("c/index.html")).unwrap();
        assert!(c.contains("/blog/plain/"));
        assert!(!c.contains("/blog/plus/"));

        let cpp = fs::read_to_string(tags.join("c-2/index.html")).unwrap();
        assert!(cpp.contains("/blog/plus/"));
        assert!(!cpp.contains("/blog/plain/"));

        let index = fs::read_to_string(folio.public_dir.join("blog/index.html")).unwrap();
        assert!(index.contains(r#"href="/blog/tags/c-2/">C++</a>"#));
        assert!(!index.contains(r#"">???</a>"#));
        assert!(!tags.join("index.html").exists());
    }

    #[test]
    fn test_colliding_and_empty_categories() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let mut web = Project::new("a".to_string(), "Alpha".to_string(), "");
        web.category = "Web".to_string();
        let mut web_dot = Project::new("b".to_string(), "Beta".to_string(), "");
        web_dot.category = "web.".to_string();
        let mut blank = Project::new("c".to_string(), "Gamma".to_string(), "");
        blank.category = "***".to_string();
        let content = SiteContent {
            posts: Vec::new(),
            projects: vec![web, web_dot, blank],
            about: None,
        };
        generate(&folio, &content);

        let category_dir = folio
            .public_dir
            .join("projects")
            .join(&folio.config.projects.category_dir);
        let first = fs::read_to_string(category_dir.join("web/index.html")).unwrap();
        assert!(first.contains("Alpha"));
        assert!(!first.contains("Beta"));
        let second = fs::read_to_string(category_dir.join("web-2/index.html")).unwrap();
        assert!(second.contains("Beta"));
        assert!(!second.contains("Alpha"));

        // Every project still shows up under "All"
        let all = fs::read_to_string(folio.public_dir.join("projects/index.html")).unwrap();
        assert!(all.contains("Gamma"));
        assert!(!all.contains(r#"">***</a>"#));
    }

    #[test]
    fn test_home_embeds_hero_frames() {
        let dir = tempfile::tempdir().unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();
        folio.config.hero.roles = vec!["ab".to_string()];
        generate(&folio, &sample_content());

        let home = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(home.contains(
            r#"<script type="application/json" id="hero-frames">[{"text":"a","delay_ms":100},{"text":"ab","delay_ms":100},{"text":"ab","delay_ms":2000}"#
        ));
        assert!(home.contains(r#"<span id="typing-text">ab</span>"#));
    }

    #[test]
    fn test_hero_frames_cannot_close_the_script() {
        let dir = tempfile::tempdir().unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();
        folio.config.hero.roles = vec!["</script>".to_string()];
        generate(&folio, &sample_content());

        let home = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        let start = home.find(r#"id="hero-frames">"#).unwrap();
        let end = start + home[start..].find("</script>").unwrap();
        let json = &home[start + r#"id="hero-frames">"#.len()..end];
        let frames: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(frames[8]["text"], "</script>");
    }

    #[test]
    fn test_listings_carry_search_box() {
        let dir = tempfile::tempdir().unwrap();
        let mut folio = Folio::new(dir.path()).unwrap();
        folio.config.keywords = vec!["rust".to_string(), "portfolio".to_string()];
        let mut content = sample_content();
        content.projects[0].category = "Web".to_string();
        generate(&folio, &content);

        let public = &folio.public_dir;
        let blog = fs::read_to_string(public.join("blog/index.html")).unwrap();
        assert!(blog.contains(r#"data-catalog="blog""#));
        assert!(blog.contains(r#"data-index="/search.json""#));
        assert!(blog.contains(r#"data-api="/api/search""#));
        assert!(blog.contains(r#"data-suggest="/api/suggest""#));
        assert!(blog.contains(r#"id="catalog-search""#));
        assert!(!blog.contains("data-tag="));
        assert!(blog.contains(r#"<meta name="keywords" content="rust, portfolio">"#));

        let tagged = fs::read_to_string(public.join("blog/tags/rust/index.html")).unwrap();
        assert!(tagged.contains(r#"data-tag="rust""#));

        let projects = fs::read_to_string(public.join("projects/index.html")).unwrap();
        assert!(projects.contains(r#"data-catalog="projects""#));
        assert!(!projects.contains("data-category="));

        let web = fs::read_to_string(public.join("projects/category/web/index.html")).unwrap();
        assert!(web.contains(r#"data-category="Web""#));
    }

    #[test]
    fn test_contact_page_reports_status() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        generate(&folio, &sample_content());

        let contact = fs::read_to_string(folio.public_dir.join("contact/index.html")).unwrap();
        assert!(contact.contains(r#"data-reset="5""#));
        assert!(contact.contains(r#"class="form-status""#));
        assert!(!contact.contains(r#"name="keywords""#));
    }
}

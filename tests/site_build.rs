//! Scaffold a site, add content and build it end to end

use std::fs;

use folio_rs::commands::init::init_site;
use folio_rs::commands::new::EntryKind;
use folio_rs::Folio;

#[test]
fn init_then_generate() {
    let dir = tempfile::tempdir().unwrap();
    init_site(dir.path()).unwrap();

    let folio = Folio::new(dir.path()).unwrap();
    assert_eq!(folio.config.title, "My Portfolio");
    folio.generate().unwrap();

    let public = &folio.public_dir;
    for page in [
        "index.html",
        "about/index.html",
        "projects/index.html",
        "projects/category/full-stack/index.html",
        "projects/portfolio-site/index.html",
        "blog/index.html",
        "blog/tags/intro/index.html",
        "blog/hello-world/index.html",
        "contact/index.html",
        "404.html",
    ] {
        assert!(public.join(page).exists(), "missing {}", page);
    }

    let home = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(home.contains(r#"id="hero-frames""#));
    assert!(home.contains("Full-Stack Developer"));
    assert!(home.contains("Portfolio Site"));
    assert!(home.contains("Hello World"));

    let post = fs::read_to_string(public.join("blog/hello-world/index.html")).unwrap();
    assert!(post.contains(r#"<h2 id="writing-posts">Writing posts</h2>"#));
    assert!(post.contains(r##"href="#code-blocks""##));
    assert!(post.contains("<strong>bold text</strong>"));
    assert!(post.contains("<ol><li>Ordered items use a number</li>"));

    let search: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(public.join("search.json")).unwrap()).unwrap();
    assert_eq!(search["posts"][0]["id"], "hello-world");
    assert_eq!(search["projects"][0]["category"], "Full-Stack");

    let feed = fs::read_to_string(public.join("atom.xml")).unwrap();
    assert!(feed.contains("<title>Hello World</title>"));
}

#[test]
fn new_entries_show_up_in_the_build() {
    let dir = tempfile::tempdir().unwrap();
    init_site(dir.path()).unwrap();

    let folio = Folio::new(dir.path()).unwrap();
    folio.new_entry("Second Post", EntryKind::Post).unwrap();
    assert!(folio.new_entry("Second Post", EntryKind::Post).is_err());
    folio.generate().unwrap();

    assert!(folio.public_dir.join("blog/second-post/index.html").exists());

    folio.clean().unwrap();
    assert!(!folio.public_dir.exists());
}

//! HTML helper functions

use crate::content::markdown::{heading_anchor, DisplayNode, InlineSpan, SpanKind};

/// Render display nodes as HTML.
///
/// Consecutive list items share one `<ul>` or `<ol>`; headings get the
/// anchor id the table of contents links to.
pub fn nodes_to_html(nodes: &[DisplayNode]) -> String {
    let mut html = String::new();
    let mut open_list: Option<bool> = None;

    for node in nodes {
        let ordered = match node {
            DisplayNode::ListItem { ordered, .. } => Some(*ordered),
            _ => None,
        };
        if open_list.is_some() && open_list != ordered {
            close_list(&mut html, open_list.take());
        }

        match node {
            DisplayNode::Heading { text } => {
                html.push_str(&format!(
                    r#"<h2 id="{}">{}</h2>"#,
                    html_escape(&heading_anchor(text)),
                    html_escape(text)
                ));
            }
            DisplayNode::Paragraph { spans } => {
                html.push_str("<p>");
                for span in spans {
                    html.push_str(&span_to_html(span));
                }
                html.push_str("</p>");
            }
            DisplayNode::ListItem { text, ordered } => {
                if open_list.is_none() {
                    html.push_str(if *ordered { "<ol>" } else { "<ul>" });
                    open_list = Some(*ordered);
                }
                html.push_str(&format!("<li>{}</li>", html_escape(text)));
            }
            DisplayNode::CodeBlock { text, .. } => {
                html.push_str(&format!("<pre><code>{}</code></pre>", html_escape(text)));
            }
        }
        html.push('\n');
    }
    close_list(&mut html, open_list);

    html
}

fn close_list(html: &mut String, list: Option<bool>) {
    match list {
        Some(true) => html.push_str("</ol>\n"),
        Some(false) => html.push_str("</ul>\n"),
        None => {}
    }
}

fn span_to_html(span: &InlineSpan) -> String {
    let text = html_escape(&span.text);
    match span.kind {
        SpanKind::PlainText => text,
        SpanKind::InlineCode => format!("<code>{}</code>", text),
        SpanKind::Bold => format!("<strong>{}</strong>", text),
    }
}

/// Table of contents linking each heading to its anchor
pub fn toc_html(headings: &[String]) -> String {
    if headings.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<ul class="toc-list">"#);
    for heading in headings {
        html.push_str(&format!(
            r##"<li><a href="#{}">{}</a></li>"##,
            html_escape(&heading_anchor(heading)),
            html_escape(heading)
        ));
    }
    html.push_str("</ul>");
    html
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="website">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio-rs {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::markdown::render;

    #[test]
    fn test_nodes_to_html() {
        let nodes = render(
            "## Getting Started\nRun `cargo <build>` **now**\n- a\n- b\n1. one\n```\nx < y\n```",
        );
        let html = nodes_to_html(&nodes);
        assert!(html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#));
        assert!(html.contains(
            "<p>Run <code>cargo &lt;build&gt;</code> <strong>now</strong></p>"
        ));
        assert!(html.contains("<ul><li>a</li>\n<li>b</li>\n</ul>\n<ol><li>one</li>"));
        assert!(html.contains("</ol>\n<pre><code>x &lt; y</code></pre>"));
    }

    #[test]
    fn test_list_closed_at_end() {
        let html = nodes_to_html(&render("- last"));
        assert_eq!(html, "<ul><li>last</li>\n</ul>\n");
    }

    #[test]
    fn test_toc_html() {
        let toc = toc_html(&["What are RSC?".to_string(), "Tips & Tricks".to_string()]);
        assert!(toc.contains(r##"href="#what-are-rsc?""##));
        assert!(toc.contains("Tips &amp; Tricks"));
        assert!(toc_html(&[]).is_empty());
    }

    #[test]
    fn test_escape() {
        assert_eq!(html_escape(r#"<a href="x">'"#), "&lt;a href=&quot;x&quot;&gt;&#39;");
    }

    #[test]
    fn test_open_graph() {
        let tags = open_graph("Blog", "", "https://example.com/blog/", None, "Site");
        assert!(tags.contains(r#"og:title" content="Blog""#));
        assert!(!tags.contains("og:description"));
    }
}

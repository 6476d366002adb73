//! Markdown-subset rendering
//!
//! Post bodies use a deliberately small line-oriented dialect: `## ` headings,
//! `- ` and `1. `..`4. ` list items, fenced code blocks and paragraphs with
//! inline code and bold spans. Rendering is a single forward pass over lines
//! and never fails.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Fence marker opening and closing a code block
pub const FENCE: &str = "```";

const HEADING_MARKER: &str = "## ";
const BULLET_MARKER: &str = "- ";
const ORDERED_MARKERS: [&str; 4] = ["1. ", "2. ", "3. ", "4. "];

lazy_static! {
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]+`").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Formatting of an inline span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    PlainText,
    InlineCode,
    Bold,
}

/// A run of paragraph text sharing one formatting kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::PlainText,
            text: text.into(),
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::InlineCode,
            text: text.into(),
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Bold,
            text: text.into(),
        }
    }
}

/// A rendered block of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayNode {
    Heading {
        text: String,
    },
    Paragraph {
        spans: Vec<InlineSpan>,
    },
    ListItem {
        text: String,
        ordered: bool,
    },
    CodeBlock {
        text: String,
        /// Hint after the opening fence, kept as written
        language: Option<String>,
    },
}

/// Render a document into display nodes, preserving line order.
///
/// An opening fence without a matching close swallows the rest of the
/// document and produces no node for it.
pub fn render(document: &str) -> Vec<DisplayNode> {
    let mut nodes = Vec::new();
    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut code_language: Option<String> = None;

    for line in document.trim().lines() {
        if let Some(hint) = line.strip_prefix(FENCE) {
            if in_code_block {
                let text = code_buffer.strip_suffix('\n').unwrap_or(&code_buffer);
                nodes.push(DisplayNode::CodeBlock {
                    text: text.to_string(),
                    language: code_language.take(),
                });
                code_buffer.clear();
                in_code_block = false;
            } else {
                let hint = hint.trim();
                code_language = (!hint.is_empty()).then(|| hint.to_string());
                code_buffer.clear();
                in_code_block = true;
            }
            continue;
        }

        if in_code_block {
            code_buffer.push_str(line);
            code_buffer.push('\n');
            continue;
        }

        if let Some(text) = line.strip_prefix(HEADING_MARKER) {
            nodes.push(DisplayNode::Heading {
                text: text.to_string(),
            });
        } else if let Some(text) = line.strip_prefix(BULLET_MARKER) {
            nodes.push(DisplayNode::ListItem {
                text: text.to_string(),
                ordered: false,
            });
        } else if let Some(text) = strip_ordered_marker(line) {
            nodes.push(DisplayNode::ListItem {
                text: text.to_string(),
                ordered: true,
            });
        } else if !line.trim().is_empty() {
            nodes.push(DisplayNode::Paragraph {
                spans: split_inline(line),
            });
        }
    }

    if in_code_block {
        tracing::debug!(
            "Unterminated code block, discarding {} bytes",
            code_buffer.len()
        );
    }

    nodes
}

fn strip_ordered_marker(line: &str) -> Option<&str> {
    ORDERED_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
}

/// Split a paragraph line into inline spans.
///
/// Code spans are cut out first; bold markers are only recognised in the
/// plain text between them.
pub fn split_inline(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for code in INLINE_CODE.find_iter(line) {
        push_plain(&mut spans, &line[last..code.start()]);
        let inner = &line[code.start() + 1..code.end() - 1];
        spans.push(InlineSpan::code(inner));
        last = code.end();
    }
    push_plain(&mut spans, &line[last..]);

    spans
}

fn push_plain(spans: &mut Vec<InlineSpan>, segment: &str) {
    let mut last = 0;
    for caps in BOLD.captures_iter(segment) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(InlineSpan::plain(&segment[last..whole.start()]));
        }
        spans.push(InlineSpan::bold(inner.as_str()));
        last = whole.end();
    }
    if last < segment.len() {
        spans.push(InlineSpan::plain(&segment[last..]));
    }
}

/// Heading texts of a document in order, used for the table of contents.
///
/// Every line starting with `## ` counts, including lines inside fenced
/// code blocks.
pub fn extract_headings(document: &str) -> Vec<String> {
    document
        .lines()
        .filter_map(|line| line.strip_prefix(HEADING_MARKER))
        .map(str::to_string)
        .collect()
}

/// Anchor id for a heading: lower-cased, whitespace runs become `-`.
///
/// Duplicate headings share an anchor.
pub fn heading_anchor(heading: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&heading.to_lowercase(), "-")
        .into_owned()
}

/// Split an excerpt from content (text before `<!-- more -->`)
pub fn split_excerpt(content: &str) -> (Option<String>, String) {
    if let Some(pos) = content.find("<!-- more -->") {
        let excerpt = content[..pos].trim().to_string();
        let remaining = content[pos + 13..].trim().to_string();
        let full = format!("{}\n\n{}", excerpt, remaining);
        (Some(excerpt), full)
    } else {
        (None, content.to_string())
    }
}

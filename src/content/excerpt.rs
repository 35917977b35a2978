//! Excerpt derivation
//!
//! The first tier that matches wins:
//! 1. a `<p data-excerpt>` paragraph, tags stripped and whitespace collapsed
//! 2. the first `**bold**` span, verbatim
//! 3. the plain text of the body cut to a fixed length, followed by `...`

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Options, Parser, TagEnd};
use regex::Regex;

use crate::helpers::{collapse_whitespace, strip_html, take_chars};

/// Appended to the plain-text excerpt whether or not it was cut
pub const TRUNCATION_MARKER: &str = "...";

pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// One attribute value: quoted, a JSX expression, or bare
const ATTRIBUTE_VALUE: &str = r#"(?:\s*=\s*(?:"[^"]*"|'[^']*'|\{[^}]*\}|[^\s"'>]+))"#;

lazy_static! {
    /// A `<p>` whose attribute list holds `data-excerpt` as an attribute name
    static ref MARKED_PARAGRAPH: Regex = Regex::new(&format!(
        r"(?is)<p(?:\s+[^\s=>/]+{value}?)*?\s+data-excerpt{value}?(?:\s+[^\s=>/]+{value}?)*\s*>(.*?)</p\s*>",
        value = ATTRIBUTE_VALUE
    ))
    .unwrap();
    static ref BOLD_SPAN: Regex = Regex::new(r"(?s)\*\*(.+?)\*\*").unwrap();
}

/// Derive the listing excerpt of a raw body
pub fn excerpt(raw_body: &str, length: usize) -> String {
    if let Some(text) = marked_paragraph(raw_body) {
        return text;
    }
    if let Some(text) = bold_span(raw_body) {
        return text;
    }
    plain_excerpt(raw_body, length)
}

fn marked_paragraph(body: &str) -> Option<String> {
    let inner = MARKED_PARAGRAPH.captures(body)?.get(1)?.as_str();
    Some(collapse_whitespace(&strip_html(inner)).trim().to_string())
}

fn bold_span(body: &str) -> Option<String> {
    BOLD_SPAN
        .captures(body)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

fn plain_excerpt(body: &str, length: usize) -> String {
    let text = collapse_whitespace(&plain_text(body));
    format!("{}{}", take_chars(text.trim(), length), TRUNCATION_MARKER)
}

/// Prose of a body with markup removed
pub fn plain_text(body: &str) -> String {
    let without_tags = strip_html(body);
    let parser = Parser::new_ext(
        &without_tags,
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS,
    );

    let mut text = String::with_capacity(without_tags.len());
    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }
    text
}

//! HTML and text helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string, keeping the text between them
pub fn strip_html(s: &str) -> String {
    TAG_REGEX.replace_all(s, "").into_owned()
}

/// Collapse every run of whitespace (newlines included) into a single space
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_REGEX.replace_all(s, " ").into_owned()
}

/// First `length` characters of a string (not bytes)
pub fn take_chars(s: &str, length: usize) -> String {
    s.chars().take(length).collect()
}

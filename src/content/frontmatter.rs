//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Key-value block at the top of a post, in authoring order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, Value>);

impl Metadata {
    /// Raw value of a key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Value of a key when it is a YAML string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Value of a scalar key rendered as text (numbers and booleans included)
    pub fn display(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<String> {
        self.display("date")
    }

    pub fn category(&self) -> Option<&str> {
        self.get_str("category")
    }

    pub fn status(&self) -> Option<String> {
        self.display("status")
    }

    pub fn title(&self) -> Option<String> {
        self.display("title")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

/// Splits a leading YAML block from the body of a content file
pub struct FrontMatter;

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (metadata, remaining_content)
    ///
    /// A file without a leading `---` block has empty metadata and is all body.
    /// A block that is not a YAML mapping is an error.
    pub fn parse(content: &str) -> Result<(Metadata, &str), serde_yaml::Error> {
        let trimmed = content.trim_start();

        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((Metadata::default(), content));
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Closing fence directly after the opening one
        if let Some(remaining) = rest.strip_prefix("---") {
            return Ok((Metadata::default(), strip_leading_newline(remaining)));
        }

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((Metadata::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        // The rest of the closing fence line is discarded
        let remaining = match remaining.find('\n') {
            Some(pos) => &remaining[pos + 1..],
            None => "",
        };

        if yaml_content.trim().is_empty() {
            return Ok((Metadata::default(), remaining));
        }

        let metadata: Metadata = serde_yaml::from_str(yaml_content)?;
        Ok((metadata, remaining))
    }
}

fn strip_leading_newline(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Błąd w matrixie
date: 2024-01-15
category: Cyber Surrealizm
status: KRYTYCZNY
---

To jest treść.
"#;

        let (meta, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(meta.title().as_deref(), Some("Błąd w matrixie"));
        assert_eq!(meta.date().as_deref(), Some("2024-01-15"));
        assert_eq!(meta.category(), Some("Cyber Surrealizm"));
        assert_eq!(meta.status().as_deref(), Some("KRYTYCZNY"));
        assert_eq!(body, "\nTo jest treść.\n");
    }

    #[test]
    fn test_keys_keep_authoring_order() {
        let content = "---\nzeta: 1\nalpha: 2\n---\nbody";
        let (meta, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = meta.0.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_scalar_display() {
        let content = "---\ndate: 2024\nstatus: true\ncategory: 7\n---\n";
        let (meta, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(meta.date().as_deref(), Some("2024"));
        assert_eq!(meta.status().as_deref(), Some("true"));
        // a numeric category is not a usable display string
        assert_eq!(meta.category(), None);
        assert_eq!(body, "");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body.\n";
        let (meta, body) = FrontMatter::parse(content).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let content = "---\ntitle: never closed\n";
        let (meta, body) = FrontMatter::parse(content).unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (meta, body) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_malformed_frontmatter_is_an_error() {
        let content = "---\ntitle: [unterminated\n---\nbody";
        assert!(FrontMatter::parse(content).is_err());

        let not_a_mapping = "---\n- just\n- a list\n---\nbody";
        assert!(FrontMatter::parse(not_a_mapping).is_err());
    }
}

//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub static_dir: String,
    pub post_dir: String,
    pub category_dir: String,

    // Content
    pub content_extension: String,
    /// Year prefix of the `date` that pins a post above all others
    pub pinned_date: String,
    pub excerpt_length: usize,
    pub critical_statuses: Vec<String>,
    pub highlight_theme: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "bugabsurd.pl".to_string(),
            subtitle: "Data Stream".to_string(),
            description: String::new(),
            author: String::new(),
            language: "pl".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),
            post_dir: "posts".to_string(),
            category_dir: "kategoria".to_string(),

            content_extension: "mdx".to_string(),
            pinned_date: "3069".to_string(),
            excerpt_length: crate::content::DEFAULT_EXCERPT_LENGTH,
            critical_statuses: vec!["KRYTYCZNY".to_string(), "USZKODZONY".to_string()],
            highlight_theme: "base16-ocean.dark".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// A string from the additional fields
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_yaml::Value::as_str)
    }

    /// A list of strings from the additional fields; a single string is a
    /// one-line list and anything else is empty
    pub fn extra_lines(&self, key: &str) -> Vec<String> {
        match self.extra.get(key) {
            Some(serde_yaml::Value::String(line)) => vec![line.clone()],
            Some(serde_yaml::Value::Sequence(lines)) => lines
                .iter()
                .filter_map(|line| line.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether a status should be rendered with the critical badge
    pub fn is_critical_status(&self, status: &str) -> bool {
        self.critical_statuses.iter().any(|s| s == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.content_extension, "mdx");
        assert_eq!(config.pinned_date, "3069");
        assert_eq!(config.excerpt_length, 150);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Glitch Log
category_dir: category
pinned_date: "2999"
critical_statuses:
  - BROKEN
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Glitch Log");
        assert_eq!(config.category_dir, "category");
        assert_eq!(config.pinned_date, "2999");
        assert_eq!(config.post_dir, "posts");
        assert!(config.is_critical_status("BROKEN"));
        assert!(!config.is_critical_status("KRYTYCZNY"));
    }

    #[test]
    fn test_extra_fields() {
        let yaml = r#"
manifesto:
  - Pierwsza linia.
  - Druga linia.
operator_note: Jedna linia.
operator_image: /img/ja.png
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.extra_lines("manifesto"), vec!["Pierwsza linia.", "Druga linia."]);
        assert_eq!(config.extra_lines("operator_note"), vec!["Jedna linia."]);
        assert_eq!(config.extra_str("operator_image"), Some("/img/ja.png"));
        assert!(config.extra_lines("missing").is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "subtitle: Transmisja\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.subtitle, "Transmisja");
        assert!(config.is_critical_status("USZKODZONY"));
    }
}

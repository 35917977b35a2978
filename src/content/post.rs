//! Post models

use serde::Serialize;

use super::Metadata;
use crate::helpers::category_slug;

/// One parsed content file
#[derive(Debug, Clone, Serialize)]
pub struct PostRecord {
    /// File name without the content extension
    pub identifier: String,

    /// Front-matter
    pub metadata: Metadata,

    /// Content after the front-matter, unrendered
    #[serde(skip)]
    pub raw_body: String,
}

impl PostRecord {
    pub fn new(identifier: String, metadata: Metadata, raw_body: String) -> Self {
        Self {
            identifier,
            metadata,
            raw_body,
        }
    }

    /// Title for display, falling back to the identifier
    pub fn title(&self) -> String {
        self.metadata
            .title()
            .unwrap_or_else(|| self.identifier.clone())
    }

    /// Slug of the `category` key, if it holds a string
    pub fn category_slug(&self) -> Option<String> {
        self.metadata.category().map(category_slug)
    }
}

/// A post as shown in a listing
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub identifier: String,
    pub metadata: Metadata,
    pub excerpt: String,
}

/// A neighbouring post in the listing order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavPost {
    pub identifier: String,
    pub title: String,
}

impl From<&PostRecord> for NavPost {
    fn from(post: &PostRecord) -> Self {
        Self {
            identifier: post.identifier.clone(),
            title: post.title(),
        }
    }
}

/// A single post with its neighbours
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub identifier: String,
    pub metadata: Metadata,
    pub raw_body: String,
    /// Older post (the one listed below this one)
    pub previous: Option<NavPost>,
    /// Newer post (the one listed above this one)
    pub next: Option<NavPost>,
}

/// Posts of one category
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryListing {
    pub posts: Vec<PostSummary>,
    /// Display name taken from the first matching post
    pub name: Option<String>,
}

/// A category with its post count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

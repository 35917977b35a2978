//! Errors raised by the content pipeline

use thiserror::Error;

/// Content ingestion and lookup errors
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Invalid front-matter in {file}: {message}")]
    FrontMatter { file: String, message: String },

    #[error("Post {identifier} has no usable `{field}` in its front-matter")]
    MissingField {
        identifier: String,
        field: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

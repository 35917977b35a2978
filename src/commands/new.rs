//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Front-matter of a post to create
pub struct NewPost<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub status: Option<&'a str>,
    /// File name without extension; derived from the title when absent
    pub identifier: Option<&'a str>,
}

/// Create a new post file and return its path
pub fn create_post(blog: &Blog, post: &NewPost) -> Result<PathBuf> {
    let identifier = match post.identifier {
        Some(id) => id.to_string(),
        None => slug::slugify(post.title),
    };
    if identifier.is_empty() || identifier.contains(['/', '\\']) {
        anyhow::bail!("Invalid post identifier: {:?}", identifier);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    let file_path = blog.posts_dir.join(format!(
        "{}.{}",
        identifier,
        blog.config.content_extension.trim_start_matches('.')
    ));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let mut front = serde_yaml::Mapping::new();
    front.insert("title".into(), post.title.into());
    front.insert("date".into(), now.format("%Y-%m-%d").to_string().into());
    front.insert("category".into(), post.category.into());
    if let Some(status) = post.status {
        front.insert("status".into(), status.into());
    }
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

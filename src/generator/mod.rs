//! Generator module - writes the whole site as static HTML files
//!
//! Output layout (below the public directory):
//! - `index.html`
//! - `<post_dir>/<identifier>/index.html`
//! - `<category_dir>/<slug>/index.html`
//! - `404.html`
//! - `posts.json`, the serialized listing
//! - everything from the static directory

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{Category, ContentLoader, ContentStore, SiteContent};
use crate::templates::PageRenderer;
use crate::Blog;

/// Number of files written by a generation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerateStats {
    pub posts: usize,
    pub categories: usize,
    pub assets: usize,
}

/// A rendered file, relative to the public directory
struct RenderedPage {
    path: PathBuf,
    content: String,
}

impl RenderedPage {
    fn new<P: Into<PathBuf>>(path: P, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

/// Static site generator
pub struct Generator<'a, S: ContentStore> {
    blog: &'a Blog,
    loader: ContentLoader<S>,
    renderer: PageRenderer,
}

impl<'a> Generator<'a, crate::content::FsStore> {
    /// Create a generator over the blog's posts directory
    pub fn new(blog: &'a Blog) -> Result<Self> {
        Self::with_loader(blog, blog.loader())
    }
}

impl<'a, S: ContentStore> Generator<'a, S> {
    /// Create a generator over any loader
    pub fn with_loader(blog: &'a Blog, loader: ContentLoader<S>) -> Result<Self> {
        Ok(Self {
            blog,
            loader,
            renderer: PageRenderer::new(&blog.config)?,
        })
    }

    /// Generate the entire site
    ///
    /// Every page is rendered before the public directory is touched, so a
    /// failed build leaves the previous output in place.
    pub fn generate(&self) -> Result<GenerateStats> {
        self.blog.ensure_disposable_public_dir()?;

        let content = self.loader.load_site()?;
        let pages = self.render_site(&content)?;

        // Stale pages of deleted posts must not survive a rebuild
        let public_dir = &self.blog.public_dir;
        if public_dir.exists() {
            fs::remove_dir_all(public_dir)
                .with_context(|| format!("Failed to clear {:?}", public_dir))?;
        }
        fs::create_dir_all(public_dir)?;

        let assets = self.copy_static_assets()?;
        for page in &pages {
            self.write_page(&page.path, &page.content)?;
        }

        Ok(GenerateStats {
            posts: content.details.len(),
            categories: content.categories.len(),
            assets,
        })
    }

    fn render_site(&self, content: &SiteContent) -> Result<Vec<RenderedPage>> {
        let config = &self.blog.config;
        let mut pages = Vec::with_capacity(content.details.len() + content.categories.len() + 3);

        let categories: Vec<Category> = content
            .categories
            .iter()
            .map(|(category, _)| category.clone())
            .collect();
        pages.push(RenderedPage::new(
            "index.html",
            self.renderer.index(&content.posts, &categories)?,
        ));

        for detail in &content.details {
            let path = Path::new(&config.post_dir)
                .join(&detail.identifier)
                .join("index.html");
            pages.push(RenderedPage::new(path, self.renderer.post(detail)?));
        }

        for (category, listing) in &content.categories {
            let path = Path::new(&config.category_dir)
                .join(&category.slug)
                .join("index.html");
            pages.push(RenderedPage::new(path, self.renderer.category(listing)?));
        }

        pages.push(RenderedPage::new("404.html", self.renderer.not_found(None)?));

        // The listing as JSON for client-side consumers
        pages.push(RenderedPage::new(
            "posts.json",
            serde_json::to_string_pretty(&content.posts)?,
        ));

        Ok(pages)
    }

    /// Copy the static directory into the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(copied)
    }

    fn write_page(&self, relative: &Path, content: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

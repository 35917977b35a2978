//! Built-in glitch theme templates using the Tera template engine
//!
//! All templates are embedded in the binary. [`PageRenderer`] turns the
//! content pipeline's results into finished HTML pages; both the static
//! generator and the development server go through it.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{
    Category, CategoryListing, MarkdownRenderer, Metadata, NavPost, PostDetail, PostSummary,
};
use crate::helpers::{category_slug, category_url, html_escape, post_url, url_for};

/// Template renderer with the embedded glitch theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped when the context is built; Tera's escaper would also
        // mangle the slashes in every URL
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("glitch/layout.html")),
            ("index.html", include_str!("glitch/index.html")),
            ("category.html", include_str!("glitch/category.html")),
            ("post.html", include_str!("glitch/post.html")),
            ("404.html", include_str!("glitch/404.html")),
            // Partials
            (
                "partials/entry.html",
                include_str!("glitch/partials/entry.html"),
            ),
            (
                "partials/back.html",
                include_str!("glitch/partials/back.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
    /// Site origin, without a trailing slash
    pub url: String,
    /// Hero lines of the home page; empty means the built-in manifesto
    pub manifesto: Vec<String>,
    /// Operator note of the home page; empty means the built-in note
    pub operator_note: Vec<String>,
    pub operator_image: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            title: html_escape(&config.title),
            subtitle: html_escape(&config.subtitle),
            description: html_escape(&config.description),
            author: html_escape(&config.author),
            language: html_escape(&config.language),
            root: html_escape(&url_for(config, "")),
            url: html_escape(config.url.trim_end_matches('/')),
            manifesto: escape_all(config.extra_lines("manifesto")),
            operator_note: escape_all(config.extra_lines("operator_note")),
            operator_image: html_escape(
                &config
                    .extra_str("operator_image")
                    .map(str::to_string)
                    .unwrap_or_else(|| url_for(config, "images/operator.jpg")),
            ),
        }
    }
}

fn escape_all(lines: Vec<String>) -> Vec<String> {
    lines.iter().map(|line| html_escape(line)).collect()
}

/// Post header fields shared by listings and post pages, HTML-escaped
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub identifier: String,
    pub url: String,
    pub title: String,
    pub date: String,
    pub category: Option<String>,
    pub category_url: Option<String>,
    pub status: Option<String>,
    pub status_critical: bool,
    pub excerpt: String,
}

impl PostData {
    fn new(config: &SiteConfig, identifier: &str, metadata: &Metadata, excerpt: String) -> Self {
        let category = metadata.category().map(str::to_string);
        let status = metadata.status();
        Self {
            identifier: identifier.to_string(),
            url: html_escape(&post_url(config, identifier)),
            title: html_escape(&metadata.title().unwrap_or_else(|| identifier.to_string())),
            date: html_escape(&metadata.date().unwrap_or_default()),
            category_url: category
                .as_deref()
                .map(|c| html_escape(&category_url(config, &category_slug(c)))),
            category: category.as_deref().map(html_escape),
            status_critical: status
                .as_deref()
                .is_some_and(|s| config.is_critical_status(s)),
            status: status.as_deref().map(html_escape),
            excerpt: html_escape(&excerpt),
        }
    }

    pub fn from_summary(config: &SiteConfig, post: &PostSummary) -> Self {
        Self::new(config, &post.identifier, &post.metadata, post.excerpt.clone())
    }

    pub fn from_detail(config: &SiteConfig, post: &PostDetail) -> Self {
        Self::new(config, &post.identifier, &post.metadata, String::new())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

impl NavLink {
    fn new(config: &SiteConfig, post: &NavPost) -> Self {
        Self {
            title: html_escape(&post.title),
            url: html_escape(&post_url(config, &post.identifier)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryData {
    pub name: String,
    pub url: String,
    pub count: usize,
}

/// Renders complete pages from pipeline results
pub struct PageRenderer {
    config: SiteConfig,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl PageRenderer {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_theme(&config.highlight_theme),
        })
    }

    /// Context shared by every page; `page_url` is the root-relative URL of
    /// the page, used for its canonical link
    fn base_context(&self, page_url: Option<&str>) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::new(&self.config));
        context.insert("page_url", &page_url.map(html_escape));
        context
    }

    fn post_list(&self, posts: &[PostSummary]) -> Vec<PostData> {
        posts
            .iter()
            .map(|p| PostData::from_summary(&self.config, p))
            .collect()
    }

    /// The home page: every post plus the category index
    pub fn index(&self, posts: &[PostSummary], categories: &[Category]) -> Result<String> {
        let categories: Vec<CategoryData> = categories
            .iter()
            .map(|c| CategoryData {
                name: html_escape(&c.name),
                url: html_escape(&category_url(&self.config, &c.slug)),
                count: c.count,
            })
            .collect();

        let mut context = self.base_context(Some(&url_for(&self.config, "")));
        context.insert("posts", &self.post_list(posts));
        context.insert("categories", &categories);
        self.templates.render("index.html", &context)
    }

    /// A category index page
    pub fn category(&self, listing: &CategoryListing) -> Result<String> {
        let page_url = listing
            .name
            .as_deref()
            .map(|name| category_url(&self.config, &category_slug(name)));
        let mut context = self.base_context(page_url.as_deref());
        let name = listing.name.as_deref().map(html_escape).unwrap_or_default();
        context.insert("category_name", &name);
        context.insert("posts", &self.post_list(&listing.posts));
        self.templates.render("category.html", &context)
    }

    /// A single post page with its body rendered
    pub fn post(&self, post: &PostDetail) -> Result<String> {
        let content = self.markdown.render(&post.raw_body)?;
        let previous = post.previous.as_ref().map(|p| NavLink::new(&self.config, p));
        let next = post.next.as_ref().map(|p| NavLink::new(&self.config, p));

        let mut context =
            self.base_context(Some(&post_url(&self.config, &post.identifier)));
        context.insert("post", &PostData::from_detail(&self.config, post));
        context.insert("content", &content);
        context.insert("previous", &previous);
        context.insert("next", &next);
        self.templates.render("post.html", &context)
    }

    /// The not-found page, optionally naming what was asked for
    pub fn not_found(&self, missing: Option<&str>) -> Result<String> {
        let mut context = self.base_context(None);
        context.insert("missing", &missing.map(html_escape));
        self.templates.render("404.html", &context)
    }
}

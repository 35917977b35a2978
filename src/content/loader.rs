//! Content loader - reads posts from the content store and answers listing queries
//!
//! Every query re-reads the store; nothing is cached between calls.

use std::io;

use super::ordering::sort_posts;
use super::{
    excerpt, Category, CategoryListing, ContentError, ContentStore, FrontMatter, FsStore,
    NavPost, PostDetail, PostRecord, PostSummary,
};
use crate::config::SiteConfig;
use crate::helpers::decode_identifier;
use crate::Blog;

/// Everything a full site build needs, from a single read of the store
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    /// Listing of every post
    pub posts: Vec<PostSummary>,
    /// Every post with its neighbours, in listing order
    pub details: Vec<PostDetail>,
    /// Each category with its listing, in order of first appearance
    pub categories: Vec<(Category, CategoryListing)>,
}

/// Loads posts from a content store
pub struct ContentLoader<S = FsStore> {
    store: S,
    extension: String,
    pinned_date: String,
    excerpt_length: usize,
}

impl ContentLoader<FsStore> {
    /// Loader over the blog's posts directory
    pub fn new(blog: &Blog) -> Self {
        Self::with_store(FsStore::new(&blog.posts_dir), &blog.config)
    }
}

impl<S: ContentStore> ContentLoader<S> {
    /// Loader over any store, configured from the site config
    pub fn with_store(store: S, config: &SiteConfig) -> Self {
        Self {
            store,
            extension: format!(".{}", config.content_extension.trim_start_matches('.')),
            pinned_date: config.pinned_date.clone(),
            excerpt_length: config.excerpt_length,
        }
    }

    /// All posts in listing order, with excerpts
    pub fn list_all(&self) -> Result<Vec<PostSummary>, ContentError> {
        let posts = self.load_posts()?;
        Ok(posts.into_iter().map(|p| self.summarize(p)).collect())
    }

    /// Posts whose category slug equals `slug`, in listing order
    pub fn find_by_category(&self, slug: &str) -> Result<CategoryListing, ContentError> {
        let posts = self.load_posts()?;
        self.listing_of(&posts, slug)
    }

    /// One post and its neighbours in listing order.
    /// `identifier` may still be percent-encoded.
    pub fn find_by_identifier(&self, identifier: &str) -> Result<PostDetail, ContentError> {
        let identifier = decode_identifier(identifier);
        let posts = self.load_posts()?;

        let index = posts
            .iter()
            .position(|p| p.identifier == identifier)
            .ok_or(ContentError::NotFound(identifier))?;

        Ok(detail_at(&posts, index))
    }

    /// Distinct categories in order of first appearance in the listing
    pub fn categories(&self) -> Result<Vec<Category>, ContentError> {
        let posts = self.load_posts()?;
        collect_categories(&posts)
    }

    /// The answers of every query above, for one consistent snapshot of the store
    pub fn load_site(&self) -> Result<SiteContent, ContentError> {
        let posts = self.load_posts()?;

        let mut categories = Vec::new();
        for category in collect_categories(&posts)? {
            let listing = self.listing_of(&posts, &category.slug)?;
            categories.push((category, listing));
        }
        let details = (0..posts.len()).map(|i| detail_at(&posts, i)).collect();
        let posts = posts.into_iter().map(|p| self.summarize(p)).collect();

        Ok(SiteContent {
            posts,
            details,
            categories,
        })
    }

    /// Every post record, parsed and in listing order
    pub fn load_posts(&self) -> Result<Vec<PostRecord>, ContentError> {
        let names = match self.store.list_names() {
            Ok(names) => names,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let mut posts = Vec::new();
        for name in names {
            let Some(identifier) = name.strip_suffix(self.extension.as_str()) else {
                continue;
            };
            if identifier.is_empty() {
                continue;
            }
            posts.push(self.load_post(&name, identifier)?);
        }

        sort_posts(&mut posts, &self.pinned_date);
        tracing::debug!("Loaded {} posts", posts.len());

        Ok(posts)
    }

    /// Load a single post from the store
    fn load_post(&self, name: &str, identifier: &str) -> Result<PostRecord, ContentError> {
        let content = self.store.read(name)?;
        let (metadata, body) =
            FrontMatter::parse(&content).map_err(|e| ContentError::FrontMatter {
                file: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(PostRecord::new(
            identifier.to_string(),
            metadata,
            body.to_string(),
        ))
    }

    fn listing_of(
        &self,
        posts: &[PostRecord],
        slug: &str,
    ) -> Result<CategoryListing, ContentError> {
        let mut listing = CategoryListing::default();
        for post in posts {
            let post_slug = required_category_slug(post)?;
            if post_slug != slug {
                continue;
            }
            if listing.name.is_none() {
                listing.name = post.metadata.category().map(str::to_string);
            }
            listing.posts.push(self.summarize(post.clone()));
        }
        Ok(listing)
    }

    fn summarize(&self, post: PostRecord) -> PostSummary {
        let excerpt = excerpt::excerpt(&post.raw_body, self.excerpt_length);
        PostSummary {
            identifier: post.identifier,
            metadata: post.metadata,
            excerpt,
        }
    }
}

/// The post at `index` with the older post as `previous` and the newer one as `next`
fn detail_at(posts: &[PostRecord], index: usize) -> PostDetail {
    let post = &posts[index];
    PostDetail {
        identifier: post.identifier.clone(),
        metadata: post.metadata.clone(),
        raw_body: post.raw_body.clone(),
        previous: posts.get(index + 1).map(NavPost::from),
        next: index
            .checked_sub(1)
            .and_then(|i| posts.get(i))
            .map(NavPost::from),
    }
}

fn collect_categories(posts: &[PostRecord]) -> Result<Vec<Category>, ContentError> {
    let mut categories: Vec<Category> = Vec::new();
    for post in posts {
        let slug = required_category_slug(post)?;
        match categories.iter_mut().find(|c| c.slug == slug) {
            Some(category) => category.count += 1,
            None => categories.push(Category {
                name: post.metadata.category().unwrap_or_default().to_string(),
                slug,
                count: 1,
            }),
        }
    }
    Ok(categories)
}

fn required_category_slug(post: &PostRecord) -> Result<String, ContentError> {
    post.category_slug()
        .filter(|slug| !slug.is_empty())
        .ok_or_else(|| ContentError::MissingField {
            identifier: post.identifier.clone(),
            field: "category",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_post(dir: &Path, name: &str, date: &str, category: &str, body: &str) {
        let content = format!(
            "---\ntitle: {name}\ndate: \"{date}\"\ncategory: {category}\n---\n{body}\n"
        );
        fs::write(dir.join(name), content).unwrap();
    }

    fn loader(dir: &Path) -> ContentLoader {
        ContentLoader::with_store(FsStore::new(dir), &SiteConfig::default())
    }

    fn ids(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.identifier.as_str()).collect()
    }

    fn sample_site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        write_post(d, "alpha.mdx", "2024-01-10", "Cyber Surrealizm", "**Alfa.**");
        write_post(d, "beta.mdx", "2024-03-01", "Log Systemowy", "Beta body.");
        write_post(d, "gamma.mdx", "2069-01-01", "Cyber Surrealizm", "Gamma body.");
        write_post(d, "manifest.mdx", "3069-05-05", "Manifest", "Przypięty.");
        write_post(d, "delta.mdx", "2024-03-01", "cyber surrealizm", "Delta body.");
        fs::write(d.join("notes.md"), "---\ncategory: x\n---\nignored").unwrap();
        fs::write(d.join("image.png"), [0u8, 1, 2]).unwrap();
        dir
    }

    #[test]
    fn test_list_all_order() {
        let site = sample_site();
        let posts = loader(site.path()).list_all().unwrap();
        // beta and delta share a date and keep file name order
        assert_eq!(ids(&posts), vec!["manifest", "gamma", "beta", "delta", "alpha"]);
        assert_eq!(posts[4].excerpt, "Alfa.");
        assert_eq!(posts[2].excerpt, "Beta body....");
    }

    #[test]
    fn test_list_all_is_idempotent() {
        let site = sample_site();
        let loader = loader(site.path());
        let first = loader.list_all().unwrap();
        let second = loader.list_all().unwrap();
        assert_eq!(ids(&first), ids(&second));
        let excerpts = |p: &[PostSummary]| p.iter().map(|s| s.excerpt.clone()).collect::<Vec<_>>();
        assert_eq!(excerpts(&first), excerpts(&second));
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader(&dir.path().join("posts"));
        assert!(loader.list_all().unwrap().is_empty());
        assert!(loader.categories().unwrap().is_empty());
        assert!(loader.find_by_category("any").unwrap().posts.is_empty());
    }

    #[test]
    fn test_find_by_category() {
        let site = sample_site();
        let listing = loader(site.path())
            .find_by_category("cyber-surrealizm")
            .unwrap();
        assert_eq!(ids(&listing.posts), vec!["gamma", "delta", "alpha"]);
        assert_eq!(listing.name.as_deref(), Some("Cyber Surrealizm"));
    }

    #[test]
    fn test_find_by_unknown_category() {
        let site = sample_site();
        let listing = loader(site.path()).find_by_category("brak").unwrap();
        assert!(listing.posts.is_empty());
        assert_eq!(listing.name, None);
    }

    #[test]
    fn test_find_by_category_requires_category() {
        let site = sample_site();
        fs::write(site.path().join("orphan.mdx"), "---\ndate: 2024-01-01\n---\nbody").unwrap();
        let err = loader(site.path())
            .find_by_category("manifest")
            .unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField { field: "category", .. }
        ));
    }

    #[test]
    fn test_categories() {
        let site = sample_site();
        let categories = loader(site.path()).categories().unwrap();
        let slugs: Vec<_> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["manifest", "cyber-surrealizm", "log-systemowy"]);
        assert_eq!(categories[1].name, "Cyber Surrealizm");
        assert_eq!(categories[1].count, 3);
    }

    #[test]
    fn test_find_by_identifier_neighbours() {
        let site = sample_site();
        let loader = loader(site.path());
        let all = loader.list_all().unwrap();

        for (i, summary) in all.iter().enumerate() {
            let detail = loader.find_by_identifier(&summary.identifier).unwrap();
            let expected_next = i.checked_sub(1).map(|j| all[j].identifier.clone());
            let expected_previous = all.get(i + 1).map(|p| p.identifier.clone());
            assert_eq!(detail.next.map(|n| n.identifier), expected_next);
            assert_eq!(detail.previous.map(|p| p.identifier), expected_previous);
        }
    }

    #[test]
    fn test_find_by_identifier_body_and_title() {
        let site = sample_site();
        let detail = loader(site.path()).find_by_identifier("beta").unwrap();
        assert_eq!(detail.raw_body, "Beta body.\n");
        assert_eq!(detail.metadata.category(), Some("Log Systemowy"));
        assert_eq!(detail.next.unwrap().title, "gamma.mdx");
        assert_eq!(detail.previous.unwrap().identifier, "delta");
    }

    #[test]
    fn test_find_by_identifier_decodes() {
        let site = sample_site();
        write_post(site.path(), "błąd w matrixie.mdx", "2020-01-01", "Glitch", "x");
        let detail = loader(site.path())
            .find_by_identifier("b%C5%82%C4%85d%20w%20matrixie")
            .unwrap();
        assert_eq!(detail.identifier, "błąd w matrixie");
        assert!(detail.previous.is_none());
    }

    #[test]
    fn test_find_by_identifier_not_found() {
        let site = sample_site();
        let err = loader(site.path()).find_by_identifier("nie-istnieje").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
        // files with another extension are not posts
        let err = loader(site.path()).find_by_identifier("notes").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_load_site_matches_single_queries() {
        let site = sample_site();
        let loader = loader(site.path());
        let content = loader.load_site().unwrap();

        assert_eq!(ids(&content.posts), ids(&loader.list_all().unwrap()));
        assert_eq!(content.details.len(), 5);
        for detail in &content.details {
            let single = loader.find_by_identifier(&detail.identifier).unwrap();
            assert_eq!(detail.previous, single.previous);
            assert_eq!(detail.next, single.next);
            assert_eq!(detail.raw_body, single.raw_body);
        }

        let slugs: Vec<_> = content.categories.iter().map(|(c, _)| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["manifest", "cyber-surrealizm", "log-systemowy"]);
        let (_, listing) = &content.categories[1];
        assert_eq!(ids(&listing.posts), vec!["gamma", "delta", "alpha"]);
    }

    #[test]
    fn test_malformed_frontmatter_fails_listing() {
        let site = sample_site();
        fs::write(site.path().join("broken.mdx"), "---\ntitle: [oops\n---\nbody").unwrap();
        let err = loader(site.path()).list_all().unwrap_err();
        match err {
            ContentError::FrontMatter { file, .. } => assert_eq!(file, "broken.mdx"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

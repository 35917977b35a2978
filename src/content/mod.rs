//! Content module - post ingestion, excerpts, ordering and lookup

mod error;
pub mod excerpt;
mod frontmatter;
pub mod loader;
mod markdown;
mod ordering;
mod post;
mod store;

pub use error::ContentError;
pub use excerpt::DEFAULT_EXCERPT_LENGTH;
pub use frontmatter::{FrontMatter, Metadata};
pub use loader::{ContentLoader, SiteContent};
pub use markdown::MarkdownRenderer;
pub use post::{Category, CategoryListing, NavPost, PostDetail, PostRecord, PostSummary};
pub use store::{ContentStore, FsStore};

//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a URL path segment (everything `encodeURIComponent` escapes)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Percent-encode a post identifier for use as a URL segment
pub fn encode_identifier(identifier: &str) -> String {
    utf8_percent_encode(identifier, SEGMENT).to_string()
}

/// Decode an identifier received from a URL; invalid UTF-8 is replaced
pub fn decode_identifier(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Slug of a category display name: lowercase, every space replaced by a hyphen
///
/// # Examples
/// ```ignore
/// category_slug("Cyber Surrealizm") // -> "cyber-surrealizm"
/// ```
pub fn category_slug(category: &str) -> String {
    category.to_lowercase().replace(' ', "-")
}

/// Link to a post page
pub fn post_url(config: &SiteConfig, identifier: &str) -> String {
    url_for(
        config,
        &format!("{}/{}/", config.post_dir, encode_identifier(identifier)),
    )
}

/// Link to a category index page
pub fn category_url(config: &SiteConfig, slug: &str) -> String {
    url_for(
        config,
        &format!("{}/{}/", config.category_dir, encode_identifier(slug)),
    )
}

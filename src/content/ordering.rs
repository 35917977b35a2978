//! Listing order: pinned posts first, then newest first

use chrono::NaiveDateTime;
use std::cmp::Ordering;

use super::PostRecord;
use crate::helpers::parse_date;

/// Sort key of a post, computed once per listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SortKey {
    pinned: bool,
    date: Option<NaiveDateTime>,
}

impl SortKey {
    fn of(post: &PostRecord, pinned_date: &str) -> Self {
        let raw = post.metadata.date();
        let pinned = !pinned_date.is_empty()
            && raw.as_deref().is_some_and(|d| d.trim().starts_with(pinned_date));
        let date = raw.as_deref().and_then(parse_date);
        if date.is_none() && !pinned {
            tracing::warn!(
                "Post {} has no parseable date ({:?}), listing it last",
                post.identifier,
                raw
            );
        }
        Self { pinned, date }
    }
}

/// Listing comparison: pinned before everything, then by date descending,
/// dateless posts last. Equal keys compare equal so a stable sort keeps input order.
fn compare(a: &SortKey, b: &SortKey) -> Ordering {
    match (a.pinned, b.pinned) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (true, true) => return Ordering::Equal,
        (false, false) => {}
    }
    match (a.date, b.date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort posts into listing order in place
pub fn sort_posts(posts: &mut Vec<PostRecord>, pinned_date: &str) {
    let mut keyed: Vec<(SortKey, PostRecord)> = posts
        .drain(..)
        .map(|p| (SortKey::of(&p, pinned_date), p))
        .collect();
    // Vec::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| compare(a, b));
    posts.extend(keyed.into_iter().map(|(_, p)| p));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Metadata;

    fn post(id: &str, date: Option<&str>) -> PostRecord {
        let mut metadata = Metadata::default();
        if let Some(date) = date {
            metadata.insert("date", serde_yaml::Value::String(date.to_string()));
        }
        PostRecord::new(id.to_string(), metadata, String::new())
    }

    fn ids(posts: &[PostRecord]) -> Vec<&str> {
        posts.iter().map(|p| p.identifier.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let mut posts = vec![
            post("old", Some("2023-01-01")),
            post("new", Some("2024-06-01")),
            post("mid", Some("2023-12-31 23:59")),
        ];
        sort_posts(&mut posts, "3069");
        assert_eq!(ids(&posts), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_pinned_sentinel_first() {
        let mut posts = vec![
            post("far-future", Some("2069-01-01")),
            post("pinned", Some("3069-05-05")),
            post("recent", Some("2024-01-01")),
        ];
        sort_posts(&mut posts, "3069");
        assert_eq!(ids(&posts), vec!["pinned", "far-future", "recent"]);
    }

    #[test]
    fn test_pinned_even_when_not_a_date() {
        let mut posts = vec![post("normal", Some("9999-12-31")), post("pinned", Some("3069"))];
        sort_posts(&mut posts, "3069");
        assert_eq!(ids(&posts), vec!["pinned", "normal"]);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let mut posts = vec![
            post("b", Some("2024-01-01")),
            post("a", Some("2024-01-01")),
            post("c", Some("2025-01-01")),
            post("d", Some("2024-01-01")),
        ];
        sort_posts(&mut posts, "3069");
        assert_eq!(ids(&posts), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_dateless_posts_last_in_input_order() {
        let mut posts = vec![
            post("no-date", None),
            post("garbage", Some("wczoraj")),
            post("dated", Some("2020-01-01")),
        ];
        sort_posts(&mut posts, "3069");
        assert_eq!(ids(&posts), vec!["dated", "no-date", "garbage"]);
    }
}

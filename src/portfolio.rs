//! Merging, filtering and paging of the portfolio grid

use crate::error::AppError;
use crate::model::{MediaKind, MediaRecord};

/// Default page size for public lists
pub const DEFAULT_LIMIT: usize = 10;

/// Hard cap on the page size
pub const MAX_LIMIT: usize = 100;

/// Content-type filter for the portfolio grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFilter {
    #[default]
    All,
    Video,
    Audio,
}

impl ContentFilter {
    /// Parses the `filter` query parameter; absent means `All`
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(ContentFilter::All),
            Some("video") => Ok(ContentFilter::Video),
            Some("audio") => Ok(ContentFilter::Audio),
            Some(other) => Err(AppError::Validation(format!(
                "Unknown filter \"{}\". Expected \"all\", \"video\" or \"audio\".",
                other
            ))),
        }
    }

    fn admits(self, kind: MediaKind) -> bool {
        match self {
            ContentFilter::All => true,
            ContentFilter::Video => kind == MediaKind::Video,
            ContentFilter::Audio => kind == MediaKind::Audio,
        }
    }
}

/// Combines both collections, newest first
///
/// The sort is stable, so records with equal timestamps keep their input
/// order (videos before audio). Nothing should depend on that.
pub fn merge_newest_first(videos: Vec<MediaRecord>, audios: Vec<MediaRecord>) -> Vec<MediaRecord> {
    let mut all = videos;
    all.extend(audios);
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    all
}

pub fn apply_filter(items: Vec<MediaRecord>, filter: ContentFilter) -> Vec<MediaRecord> {
    items.into_iter().filter(|item| filter.admits(item.kind)).collect()
}

/// Normalized page/limit pair: page starts at 1, limit is capped
pub fn page_bounds(page: Option<usize>, limit: Option<usize>) -> (usize, usize) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (page, limit)
}

pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Vec<T> {
    let offset = (page - 1).saturating_mul(limit);
    items.into_iter().skip(offset).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, kind: MediaKind, secs: i64) -> MediaRecord {
        MediaRecord {
            id: id.to_string(),
            title: id.to_string(),
            tags: vec![],
            url: format!("http://localhost/media/{id}"),
            cover_url: None,
            kind,
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    fn ids(items: &[MediaRecord]) -> Vec<&str> {
        items.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn merge_orders_by_descending_creation_time() {
        let videos = vec![record("v1", MediaKind::Video, 300), record("v2", MediaKind::Video, 100)];
        let audios = vec![record("a1", MediaKind::Audio, 400), record("a2", MediaKind::Audio, 200)];

        let merged = merge_newest_first(videos, audios);
        assert_eq!(ids(&merged), vec!["a1", "v1", "a2", "v2"]);
        assert!(merged.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn merge_handles_empty_sides() {
        let merged = merge_newest_first(vec![], vec![record("a1", MediaKind::Audio, 1)]);
        assert_eq!(ids(&merged), vec!["a1"]);
        assert!(merge_newest_first(vec![], vec![]).is_empty());
    }

    #[test]
    fn filter_all_is_union_and_kinds_are_exact() {
        let items = vec![
            record("v1", MediaKind::Video, 3),
            record("a1", MediaKind::Audio, 2),
            record("v2", MediaKind::Video, 1),
        ];

        assert_eq!(ids(&apply_filter(items.clone(), ContentFilter::All)), vec!["v1", "a1", "v2"]);
        assert_eq!(ids(&apply_filter(items.clone(), ContentFilter::Video)), vec!["v1", "v2"]);
        assert_eq!(ids(&apply_filter(items, ContentFilter::Audio)), vec!["a1"]);
    }

    #[test]
    fn filter_parsing() {
        assert_eq!(ContentFilter::parse(None).unwrap(), ContentFilter::All);
        assert_eq!(ContentFilter::parse(Some("all")).unwrap(), ContentFilter::All);
        assert_eq!(ContentFilter::parse(Some("video")).unwrap(), ContentFilter::Video);
        assert_eq!(ContentFilter::parse(Some("audio")).unwrap(), ContentFilter::Audio);
        assert!(ContentFilter::parse(Some("images")).is_err());
    }

    #[test]
    fn paging() {
        assert_eq!(page_bounds(None, None), (1, DEFAULT_LIMIT));
        assert_eq!(page_bounds(Some(0), Some(1000)), (1, MAX_LIMIT));

        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(items.clone(), 1, 10), (0..10).collect::<Vec<_>>());
        assert_eq!(paginate(items.clone(), 3, 10), (20..25).collect::<Vec<_>>());
        assert!(paginate(items, 4, 10).is_empty());
    }
}

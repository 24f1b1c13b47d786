//! Latest-announcement widget.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sanitize::trim_words;
use crate::store::StoreError;

/// Recipient status marking an unread announcement.
pub const UNREAD: &str = "unread";

/// An announcement addressed to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Recipient row ID.
    pub id: i64,
    /// Announcement post ID.
    pub post_id: i64,
    /// Title.
    pub title: String,
    /// Body (rich text).
    pub content: String,
    /// Publication time.
    pub published_at: DateTime<Utc>,
    /// Recipient status (`read` / `unread`).
    pub status: String,
}

/// Source of a user's announcements.
pub trait AnnouncementDirectory: Send + Sync {
    /// Announcements addressed to `user_id`.
    fn for_user(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Announcement>, StoreError>> + Send;
}

/// One rendered announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementEntry {
    /// Recipient row ID.
    pub id: i64,
    /// Announcement post ID.
    pub post_id: i64,
    /// Title.
    pub title: String,
    /// Formatted publication date.
    pub date: String,
    /// Plain-text excerpt.
    pub excerpt: String,
    /// Whether the user has not read it yet.
    pub unread: bool,
}

/// Rendered announcement widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementWidget {
    /// Entries, newest first.
    pub entries: Vec<AnnouncementEntry>,
}

/// Formats a timestamp with a strftime pattern, falling back to ISO dates
/// when the pattern is invalid.
#[must_use]
pub fn format_date(at: DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", at.format("%Y-%m-%d"));
    }
    out
}

impl AnnouncementEntry {
    /// Renders an announcement with the given date format and excerpt length.
    #[must_use]
    pub fn render(announcement: &Announcement, date_format: &str, excerpt_words: usize) -> Self {
        Self {
            id: announcement.id,
            post_id: announcement.post_id,
            title: announcement.title.clone(),
            date: format_date(announcement.published_at, date_format),
            excerpt: trim_words(&announcement.content, excerpt_words),
            unread: announcement.status == UNREAD,
        }
    }
}

/// Builds the widget, newest announcement first.
#[must_use]
pub fn build_announcement_widget(
    mut announcements: Vec<Announcement>,
    date_format: &str,
    excerpt_words: usize,
) -> AnnouncementWidget {
    announcements.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));

    AnnouncementWidget {
        entries: announcements
            .iter()
            .map(|a| AnnouncementEntry::render(a, date_format, excerpt_words))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn announcement(id: i64, day: u32, status: &str, content: &str) -> Announcement {
        Announcement {
            id,
            post_id: id * 10,
            title: format!("Notice {id}"),
            content: content.to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 4, day, 8, 0, 0).unwrap(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_newest_first_with_unread_flag() {
        let widget = build_announcement_widget(
            vec![
                announcement(1, 1, "read", "Old news"),
                announcement(2, 9, "unread", "<p>Fresh <b>news</b></p>"),
            ],
            "%Y-%m-%d",
            40,
        );

        assert_eq!(widget.entries[0].id, 2);
        assert_eq!(widget.entries[0].post_id, 20);
        assert!(widget.entries[0].unread);
        assert_eq!(widget.entries[0].excerpt, "Fresh news");
        assert_eq!(widget.entries[0].date, "2026-04-09");
        assert!(!widget.entries[1].unread);
    }

    #[test]
    fn test_excerpt_is_word_limited() {
        let body = (1..=45).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        let entry = AnnouncementEntry::render(&announcement(1, 1, "read", &body), "%d/%m/%Y", 40);

        assert!(entry.excerpt.ends_with("w40…"));
        assert_eq!(entry.excerpt.split_whitespace().count(), 40);
        assert_eq!(entry.date, "01/04/2026");
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let at = Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(at, "%Q"), "2026-04-01");
    }
}

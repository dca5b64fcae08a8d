use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use super::{normalize_date, FeedEntry};

/// Notion rich-text properties reject content longer than this
pub const MAX_TEXT_LEN: usize = 2000;

pub const TITLE_PROPERTY: &str = "Title";
pub const URL_PROPERTY: &str = "URL";
pub const SOURCE_PROPERTY: &str = "Source";
pub const PUBLISHED_PROPERTY: &str = "Published Date";
pub const SUMMARY_PROPERTY: &str = "Summary";

/// A feed entry in the shape of one database row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkRecord {
    pub title: String,
    pub url: String,
    pub source_name: String,
    pub published_at: DateTime<Utc>,
    pub summary: String,
}

impl SinkRecord {
    pub fn from_entry(entry: &FeedEntry, source_name: &str) -> Self {
        Self {
            title: truncate_chars(&entry.title, MAX_TEXT_LEN),
            url: entry.link.clone(),
            source_name: truncate_chars(source_name, MAX_TEXT_LEN),
            published_at: normalize_date(&entry.published_raw),
            summary: truncate_chars(&entry.summary, MAX_TEXT_LEN),
        }
    }

    /// Property values for the create-page call
    pub fn to_properties(&self) -> Value {
        json!({
            TITLE_PROPERTY: { "title": [ { "text": { "content": self.title } } ] },
            URL_PROPERTY: { "url": self.url },
            SOURCE_PROPERTY: { "rich_text": [ { "text": { "content": self.source_name } } ] },
            PUBLISHED_PROPERTY: {
                "date": { "start": self.published_at.to_rfc3339_opts(SecondsFormat::Secs, true) }
            },
            SUMMARY_PROPERTY: { "rich_text": [ { "text": { "content": self.summary } } ] },
        })
    }
}

/// Truncate string to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

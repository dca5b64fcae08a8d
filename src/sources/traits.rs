use crate::domain::FeedEntry;
use crate::errors::FeederResult;

/// Entries read from one feed, newest first as the feed lists them
#[derive(Debug, Clone, Default)]
pub struct FetchedFeed {
    pub entries: Vec<FeedEntry>,
    /// Problems that did not stop the feed from being read
    pub warnings: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait EntrySource {
    /// Retrieve and parse the feed at `url`
    fn fetch_entries(&self, url: &str) -> FeederResult<FetchedFeed>;
}

use std::ops::AddAssign;

use tracing::{debug, info, warn};

use crate::domain::{DedupeIndex, FeedConfig, SinkRecord};
use crate::services::filter::KeywordFilter;
use crate::services::index_service::build_index;
use crate::services::sink_writer::SinkWriter;
use crate::sources::traits::EntrySource;
use crate::storage::traits::{RecordQuery, RecordWriter};

/// Entries considered per feed, newest first
pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub dry_run: bool,
    pub max_entries_per_feed: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_entries_per_feed: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub new: usize,
    pub duplicate: usize,
    pub filtered: usize,
    pub failed: usize,
    /// Entries without a link
    pub skipped: usize,
}

impl Tally {
    /// e.g. "2 new, 1 duplicate, 0 filtered, 1 without link, 0 failed"
    pub fn describe(&self) -> String {
        format!(
            "{} new, {} duplicate, {} filtered, {} without link, {} failed",
            self.new, self.duplicate, self.filtered, self.skipped, self.failed
        )
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.new += other.new;
        self.duplicate += other.duplicate;
        self.filtered += other.filtered;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Processed,
    NoUrl,
    FetchFailed(String),
}

#[derive(Debug, Clone)]
pub struct FeedReport {
    pub name: String,
    pub status: FeedStatus,
    pub tally: Tally,
    pub warnings: Vec<String>,
    /// Records written (or, in a dry run, that would have been written)
    pub written: Vec<SinkRecord>,
}

impl FeedReport {
    fn new(name: &str, status: FeedStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            tally: Tally::default(),
            warnings: Vec::new(),
            written: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub feeds: Vec<FeedReport>,
    pub totals: Tally,
}

impl RunSummary {
    pub fn feeds_skipped(&self) -> usize {
        self.feeds
            .iter()
            .filter(|f| f.status != FeedStatus::Processed)
            .count()
    }
}

pub struct SyncService<S: EntrySource, W: RecordWriter> {
    source: S,
    writer: SinkWriter<W>,
    options: SyncOptions,
}

impl<S: EntrySource, W: RecordWriter> SyncService<S, W> {
    pub fn new(source: S, writer: W, options: SyncOptions) -> Self {
        Self {
            source,
            writer: SinkWriter::new(writer),
            options,
        }
    }

    /// Build the existing-entry index once, then mirror every configured feed in order
    pub fn run<Q: RecordQuery + ?Sized>(&self, query: &Q, feeds: &[FeedConfig]) -> RunSummary {
        let mut index = build_index(query);
        self.run_with_index(feeds, &mut index)
    }

    pub fn run_with_index(&self, feeds: &[FeedConfig], index: &mut DedupeIndex) -> RunSummary {
        let mut summary = RunSummary::default();

        for feed in feeds {
            let report = self.sync_feed(feed, index);
            summary.totals += report.tally;
            summary.feeds.push(report);
        }

        info!(
            new = summary.totals.new,
            duplicate = summary.totals.duplicate,
            filtered = summary.totals.filtered,
            failed = summary.totals.failed,
            without_link = summary.totals.skipped,
            feeds_skipped = summary.feeds_skipped(),
            "Run complete"
        );

        summary
    }

    /// Fetch one feed and write its unseen, matching entries
    pub fn sync_feed(&self, feed: &FeedConfig, index: &mut DedupeIndex) -> FeedReport {
        let url = match feed.url.as_deref() {
            Some(url) => url,
            None => {
                info!(feed = %feed.name, "No URL configured, skipping");
                return FeedReport::new(&feed.name, FeedStatus::NoUrl);
            }
        };

        let fetched = match self.source.fetch_entries(url) {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(feed = %feed.name, url, error = %e, "Skipping feed");
                return FeedReport::new(&feed.name, FeedStatus::FetchFailed(e.to_string()));
            }
        };

        let mut report = FeedReport::new(&feed.name, FeedStatus::Processed);
        for warning in &fetched.warnings {
            warn!(feed = %feed.name, url, "Malformed feed: {}", warning);
        }
        report.warnings = fetched.warnings;

        let filter = KeywordFilter::new(feed.filters.as_slice());

        for entry in fetched.entries.iter().take(self.options.max_entries_per_feed) {
            if !filter.matches(entry) {
                debug!(feed = %feed.name, title = %entry.title, "Filtered out");
                report.tally.filtered += 1;
                continue;
            }

            if entry.link.is_empty() {
                debug!(feed = %feed.name, title = %entry.title, "Entry has no link");
                report.tally.skipped += 1;
                continue;
            }

            if index.contains(&entry.link) {
                debug!(feed = %feed.name, url = %entry.link, "Already recorded");
                report.tally.duplicate += 1;
                continue;
            }

            if self.options.dry_run {
                let record = SinkRecord::from_entry(entry, &feed.name);
                index.insert(record.url.clone());
                report.tally.new += 1;
                report.written.push(record);
                continue;
            }

            match self.writer.write(entry, &feed.name) {
                Ok(record) => {
                    index.insert(record.url.clone());
                    report.tally.new += 1;
                    report.written.push(record);
                }
                Err(_) => report.tally.failed += 1,
            }
        }

        info!(
            feed = %feed.name,
            new = report.tally.new,
            duplicate = report.tally.duplicate,
            filtered = report.tally.filtered,
            failed = report.tally.failed,
            without_link = report.tally.skipped,
            "Feed processed"
        );

        report
    }
}

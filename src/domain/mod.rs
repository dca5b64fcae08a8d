pub mod date;
pub mod entry;
pub mod feed;
pub mod index;
pub mod record;

pub use date::normalize_date;
pub use entry::FeedEntry;
pub use feed::FeedConfig;
pub use index::DedupeIndex;
pub use record::{SinkRecord, MAX_TEXT_LEN};

pub mod filter;
pub mod index_service;
pub mod sink_writer;
pub mod sync_service;

pub use filter::KeywordFilter;
pub use index_service::build_index;
pub use sink_writer::SinkWriter;
pub use sync_service::{FeedReport, FeedStatus, RunSummary, SyncOptions, SyncService, Tally};

pub mod traits;
pub mod rss_atom;

pub use traits::{EntrySource, FetchedFeed};
pub use rss_atom::RssAtomSource;

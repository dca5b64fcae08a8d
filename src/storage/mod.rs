pub mod traits;
pub mod notion;

pub use traits::{RecordPage, RecordQuery, RecordWriter};
pub use self::notion::NotionDatabase;

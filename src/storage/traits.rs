use crate::domain::SinkRecord;
use crate::errors::FeederResult;

/// One page of identifiers from the sink's query endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPage {
    pub urls: Vec<String>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
pub trait RecordQuery {
    /// Fetch the page of records with a non-empty identifier starting at `start_cursor`
    fn query_page(&self, start_cursor: Option<String>) -> FeederResult<RecordPage>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RecordWriter {
    fn create(&self, record: &SinkRecord) -> FeederResult<()>;
}

impl<T: RecordQuery + ?Sized> RecordQuery for &T {
    fn query_page(&self, start_cursor: Option<String>) -> FeederResult<RecordPage> {
        (**self).query_page(start_cursor)
    }
}

impl<T: RecordWriter + ?Sized> RecordWriter for &T {
    fn create(&self, record: &SinkRecord) -> FeederResult<()> {
        (**self).create(record)
    }
}

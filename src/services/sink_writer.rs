use tracing::{debug, warn};

use crate::domain::{FeedEntry, SinkRecord};
use crate::errors::{FeederError, FeederResult};
use crate::storage::traits::RecordWriter;

pub struct SinkWriter<W: RecordWriter> {
    writer: W,
}

impl<W: RecordWriter> SinkWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Submit one entry as a new record. Failures are logged and returned, never retried.
    pub fn write(&self, entry: &FeedEntry, source_name: &str) -> FeederResult<SinkRecord> {
        let record = SinkRecord::from_entry(entry, source_name);

        match self.writer.create(&record) {
            Ok(()) => {
                debug!(source = source_name, url = %record.url, "Record created");
                Ok(record)
            }
            Err(e) => {
                match &e {
                    FeederError::Sink { status, body } => warn!(
                        source = source_name,
                        url = %record.url,
                        status,
                        body = %body,
                        "Record write rejected"
                    ),
                    other => warn!(
                        source = source_name,
                        url = %record.url,
                        error = %other,
                        "Record write failed"
                    ),
                }
                Err(e)
            }
        }
    }
}

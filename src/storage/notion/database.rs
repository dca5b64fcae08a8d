use notion::NotionClient;
use serde_json::json;

use crate::config::Config;
use crate::domain::record::URL_PROPERTY;
use crate::domain::SinkRecord;
use crate::errors::FeederResult;
use crate::storage::traits::{RecordPage, RecordQuery, RecordWriter};

/// Largest page the query endpoint hands out
pub const PAGE_SIZE: u32 = 100;

/// The Notion database feed entries are mirrored into
pub struct NotionDatabase {
    client: NotionClient,
    database_id: String,
    url_filter: serde_json::Value,
}

impl NotionDatabase {
    pub fn new(config: &Config) -> FeederResult<Self> {
        let client = NotionClient::new(&config.notion_url, &config.notion_token)?;

        Ok(Self {
            client,
            database_id: config.notion_database_id.clone(),
            url_filter: json!({
                "property": URL_PROPERTY,
                "url": { "is_not_empty": true }
            }),
        })
    }
}

impl RecordQuery for NotionDatabase {
    fn query_page(&self, start_cursor: Option<String>) -> FeederResult<RecordPage> {
        let response = self.client.query_database(
            &self.database_id,
            Some(&self.url_filter),
            PAGE_SIZE,
            start_cursor.as_deref(),
        )?;

        let urls = response
            .results
            .iter()
            .filter_map(|page| page.url_property(URL_PROPERTY))
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        Ok(RecordPage {
            urls,
            has_more: response.has_more,
            next_cursor: response.next_cursor,
        })
    }
}

impl RecordWriter for NotionDatabase {
    fn create(&self, record: &SinkRecord) -> FeederResult<()> {
        self.client
            .create_page(&self.database_id, &record.to_properties())?;
        Ok(())
    }
}

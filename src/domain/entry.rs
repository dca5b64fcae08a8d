use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published_raw: String,
    pub summary: String,
    pub content_blocks: Vec<String>,
}

impl FeedEntry {
    pub fn new(title: String, link: String) -> Self {
        Self {
            title,
            link,
            published_raw: String::new(),
            summary: String::new(),
            content_blocks: Vec::new(),
        }
    }

    pub fn with_published(mut self, published_raw: String) -> Self {
        self.published_raw = published_raw;
        self
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_content_blocks(mut self, content_blocks: Vec<String>) -> Self {
        self.content_blocks = content_blocks;
        self
    }

    /// All content blocks joined into one searchable string
    pub fn content_text(&self) -> String {
        self.content_blocks.join(" ")
    }
}

use serde::{Deserialize, Serialize};

/// One configured feed: where to read it and which keywords to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub filters: Vec<String>,
}

impl FeedConfig {
    pub fn new(name: &str, url: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            url: url.map(str::to_string),
            filters: Vec::new(),
        }
    }

    pub fn with_filters(mut self, filters: &[&str]) -> Self {
        self.filters = filters.iter().map(|f| f.to_string()).collect();
        self
    }
}

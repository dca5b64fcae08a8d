use crate::domain::FeedEntry;

/// Case-insensitive substring match over an entry's title, summary and content.
/// Matching is literal: "ai" also matches "maintain".
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self { keywords }
    }

    /// No keywords means every entry passes
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn matches(&self, entry: &FeedEntry) -> bool {
        if self.keywords.is_empty() {
            return true;
        }

        let title = entry.title.to_lowercase();
        let summary = entry.summary.to_lowercase();
        let content = entry.content_text().to_lowercase();

        self.keywords.iter().any(|keyword| {
            title.contains(keyword.as_str())
                || summary.contains(keyword.as_str())
                || content.contains(keyword.as_str())
        })
    }
}

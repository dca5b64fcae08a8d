use std::collections::HashSet;

/// Identifiers (entry URLs) already present in the sink or written during this run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupeIndex {
    urls: HashSet<String>,
}

impl DedupeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Returns false when the url was already known
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.urls.insert(url.into())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DedupeIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            urls: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for DedupeIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.urls.extend(iter.into_iter().map(Into::into));
    }
}

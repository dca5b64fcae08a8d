use feed_rs::model::{Entry, Link};
use feed_rs::parser;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use scraper::Html;
use tracing::debug;

use crate::domain::FeedEntry;
use crate::errors::{FeederError, FeederResult};
use crate::sources::traits::{EntrySource, FetchedFeed};

pub struct RssAtomSource {
    client: Client,
}

impl RssAtomSource {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn parse_bytes(bytes: &[u8]) -> FeederResult<feed_rs::model::Feed> {
        parser::parse(bytes).map_err(|e| FeederError::FeedParse(e.to_string()))
    }

    /// Parse entries from raw feed bytes
    pub(crate) fn parse_entries(bytes: &[u8]) -> FeederResult<FetchedFeed> {
        let parsed = Self::parse_bytes(bytes)?;

        let entries: Vec<FeedEntry> = parsed.entries.into_iter().map(entry_from_feed).collect();

        let mut warnings = Vec::new();
        let unlinked = entries.iter().filter(|e| e.link.is_empty()).count();
        if unlinked > 0 {
            warnings.push(format!("{} entries have no link", unlinked));
        }
        let undated = entries.iter().filter(|e| e.published_raw.is_empty()).count();
        if undated > 0 {
            warnings.push(format!(
                "{} entries have no usable date, using the current time",
                undated
            ));
        }

        Ok(FetchedFeed { entries, warnings })
    }
}

impl Default for RssAtomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EntrySource for RssAtomSource {
    fn fetch_entries(&self, url: &str) -> FeederResult<FetchedFeed> {
        let response = self.client.get(url).send().map_err(|e| {
            if e.is_connect() {
                FeederError::FeedNotFound(format!("{}: {}", url, e))
            } else {
                FeederError::Http(e)
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(FeederError::FeedNotFound(format!("{} returned {}", url, status)));
        }

        let bytes = response.bytes()?;
        debug!(url, %status, bytes = bytes.len(), "Fetched feed");

        let mut fetched = Self::parse_entries(&bytes)?;
        if !status.is_success() {
            fetched
                .warnings
                .insert(0, format!("server returned {} but the body parsed as a feed", status));
        }

        Ok(fetched)
    }
}

fn entry_from_feed(entry: Entry) -> FeedEntry {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let link = pick_link(&entry.links);

    let published = entry
        .published
        .or(entry.updated)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();
    if published.is_empty() {
        debug!(title = %title, link = %link, "Entry has no parseable date");
    }

    let summary = entry
        .summary
        .map(|s| html_to_text(&s.content))
        .unwrap_or_default();

    let mut blocks: Vec<String> = entry
        .content
        .and_then(|c| c.body)
        .map(|body| html_to_text(&body))
        .into_iter()
        .collect();
    blocks.extend(
        entry
            .media
            .into_iter()
            .filter_map(|m| m.description)
            .map(|d| html_to_text(&d.content)),
    );
    blocks.retain(|b| !b.is_empty());

    FeedEntry::new(title, link)
        .with_published(published)
        .with_summary(summary)
        .with_content_blocks(blocks)
}

/// Prefer the alternate (article) link over self/enclosure links
fn pick_link(links: &[Link]) -> String {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|l| l.href.trim().to_string())
        .unwrap_or_default()
}

/// Extract plain text from HTML content, preserving some structure
fn html_to_text(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
        }
        // Add space after block elements to preserve word boundaries
        if let Some(element) = node.value().as_element() {
            match element.name() {
                "p" | "br" | "div" | "li" | "h1" | "h2" | "h3" => text.push(' '),
                _ => {}
            }
        }
    }

    // Collapse whitespace and trim
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample RSS feed (based on Rust Blog format)
    const SAMPLE_RSS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Rust Blog</title>
    <link>https://blog.rust-lang.org/</link>
    <description>Empowering everyone to build reliable and efficient software.</description>
    <item>
      <title>Announcing Rust 1.75.0</title>
      <link>https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html</link>
      <description><![CDATA[<p>The Rust team is happy to announce a new version of Rust, 1.75.0.</p><p>It includes async fn in traits.</p>]]></description>
      <pubDate>Thu, 28 Dec 2023 00:00:00 +0000</pubDate>
      <guid>https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html</guid>
    </item>
    <item>
      <title>Rust 2024 Call for Testing</title>
      <link>https://blog.rust-lang.org/2024/01/10/Rust-2024-CFT.html</link>
      <description><![CDATA[<p>We're testing the next edition of Rust!</p>]]></description>
      <pubDate>Wed, 10 Jan 2024 00:00:00 +0000</pubDate>
      <guid>https://blog.rust-lang.org/2024/01/10/Rust-2024-CFT.html</guid>
    </item>
  </channel>
</rss>"#;

    // Sample Atom feed
    const SAMPLE_ATOM: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Tech Blog</title>
  <link href="https://example.com/"/>
  <id>https://example.com/feed.atom</id>
  <updated>2024-01-15T12:00:00Z</updated>
  <entry>
    <title>Understanding WebAssembly</title>
    <link rel="self" href="https://example.com/posts/wasm-intro.atom"/>
    <link rel="alternate" href="https://example.com/posts/wasm-intro"/>
    <id>https://example.com/posts/wasm-intro</id>
    <updated>2024-01-15T12:00:00Z</updated>
    <summary type="html"><![CDATA[<p>WebAssembly (Wasm) is a binary instruction format.</p>]]></summary>
    <content type="html"><![CDATA[<article><h1>Understanding WebAssembly</h1><p>More content about LLM runtimes.</p></article>]]></content>
  </entry>
</feed>"#;

    const UNLINKED_RSS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Notes</title>
    <item>
      <title>No link here</title>
      <description>Just text</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_rss_entries_extracted() {
        let fetched = RssAtomSource::parse_entries(SAMPLE_RSS).unwrap();

        assert_eq!(fetched.entries.len(), 2);
        assert!(fetched.warnings.is_empty());

        let first = &fetched.entries[0];
        assert_eq!(first.title, "Announcing Rust 1.75.0");
        assert_eq!(
            first.link,
            "https://blog.rust-lang.org/2023/12/28/Rust-1.75.0.html"
        );
        assert_eq!(
            first.summary,
            "The Rust team is happy to announce a new version of Rust, 1.75.0. It includes async fn in traits."
        );
        assert!(first.published_raw.starts_with("2023-12-28T00:00:00"));

        assert_eq!(fetched.entries[1].title, "Rust 2024 Call for Testing");
    }

    #[test]
    fn test_atom_prefers_alternate_link_and_reads_content() {
        let fetched = RssAtomSource::parse_entries(SAMPLE_ATOM).unwrap();

        assert_eq!(fetched.entries.len(), 1);

        let entry = &fetched.entries[0];
        assert_eq!(entry.title, "Understanding WebAssembly");
        assert_eq!(entry.link, "https://example.com/posts/wasm-intro");
        assert_eq!(entry.summary, "WebAssembly (Wasm) is a binary instruction format.");
        assert_eq!(
            entry.content_blocks,
            vec!["Understanding WebAssembly More content about LLM runtimes.".to_string()]
        );
    }

    #[test]
    fn test_entries_without_links_produce_warning() {
        let fetched = RssAtomSource::parse_entries(UNLINKED_RSS).unwrap();

        assert_eq!(fetched.entries.len(), 1);
        assert!(fetched.entries[0].link.is_empty());
        assert!(fetched.warnings.contains(&"1 entries have no link".to_string()));
    }

    #[test]
    fn test_unparseable_pub_date_is_reported() {
        let rss = br#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Notes</title>
    <item>
      <title>Odd date</title>
      <link>https://example.com/odd</link>
      <pubDate>sometime last week</pubDate>
    </item>
  </channel>
</rss>"#;

        let fetched = RssAtomSource::parse_entries(rss).unwrap();

        assert!(fetched.entries[0].published_raw.is_empty());
        assert_eq!(
            fetched.warnings,
            vec!["1 entries have no usable date, using the current time".to_string()]
        );
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let result = RssAtomSource::parse_entries(b"<html><body>Not a feed</body></html>");
        assert!(matches!(result, Err(FeederError::FeedParse(_))));
    }

    #[test]
    fn test_html_to_text_collapses_whitespace() {
        assert_eq!(
            html_to_text("<p>one</p>\n\n<p>two <b>three</b></p>"),
            "one two three"
        );
    }
}

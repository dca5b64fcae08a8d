use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::domain::FeedConfig;
use crate::errors::{FeederError, FeederResult};

const ENV_FEEDS_PATH: &str = "FEEDER_FEEDS_PATH";
const DEFAULT_FEEDS_FILE: &str = "feeds.toml";

#[derive(Debug, Deserialize)]
struct FeedList {
    #[serde(default)]
    feeds: Vec<FeedConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonFeedList {
    Wrapped(FeedList),
    Bare(Vec<FeedConfig>),
}

/// Pick the feed list path:
/// 1) explicit path (`--feeds`)
/// 2) $FEEDER_FEEDS_PATH
/// 3) feeds.toml next to the executable
/// 4) ./feeds.toml
pub fn resolve_feeds_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(ENV_FEEDS_PATH) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(dir) = Config::exe_dir() {
        let candidate = dir.join(DEFAULT_FEEDS_FILE);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(DEFAULT_FEEDS_FILE)
}

/// Load the ordered feed list from a TOML or JSON file
pub fn load_feeds(path: &Path) -> FeederResult<Vec<FeedConfig>> {
    if !path.exists() {
        return Err(FeederError::FeedListNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let feeds = parse_feeds(&content, &ext)?;
    feeds.into_iter().map(validate_feed).collect()
}

fn parse_feeds(content: &str, hint_ext: &str) -> FeederResult<Vec<FeedConfig>> {
    let try_json_first = hint_ext == "json"
        || (hint_ext != "toml" && matches!(content.trim_start().chars().next(), Some('{' | '[')));

    if !try_json_first {
        return parse_toml(content);
    }

    match parse_json(content) {
        Ok(feeds) => Ok(feeds),
        // `[[feeds]]` opens a TOML list too
        Err(json_err) if hint_ext != "json" => parse_toml(content).map_err(|_| json_err),
        Err(json_err) => Err(json_err),
    }
}

fn parse_json(content: &str) -> FeederResult<Vec<FeedConfig>> {
    let list: JsonFeedList =
        serde_json::from_str(content).map_err(|e| FeederError::FeedListParse(e.to_string()))?;
    Ok(match list {
        JsonFeedList::Wrapped(list) => list.feeds,
        JsonFeedList::Bare(feeds) => feeds,
    })
}

fn parse_toml(content: &str) -> FeederResult<Vec<FeedConfig>> {
    let list: FeedList =
        toml::from_str(content).map_err(|e| FeederError::FeedListParse(e.to_string()))?;
    Ok(list.feeds)
}

/// Blank urls mean "skip"; anything else has to be an absolute http(s) URL
fn validate_feed(mut feed: FeedConfig) -> FeederResult<FeedConfig> {
    feed.url = feed
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    if let Some(raw) = &feed.url {
        let parsed = Url::parse(raw)
            .map_err(|e| FeederError::InvalidUrl(format!("{} ({}): {}", feed.name, raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FeederError::InvalidUrl(format!(
                "{} ({}): unsupported scheme",
                feed.name, raw
            )));
        }
    }

    Ok(feed)
}

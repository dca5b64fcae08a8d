use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn feeder_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notion-feeder").unwrap();
    cmd.env_remove("NOTION_TOKEN")
        .env_remove("NOTION_DATABASE_ID")
        .env_remove("FEEDER_FEEDS_PATH");
    cmd
}

fn write_feeds(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const FEEDS_TOML: &str = r#"
[[feeds]]
name = "The Hacker News"
url = "https://feeds.feedburner.com/TheHackersNews"
filters = ["llm", "prompt injection"]

[[feeds]]
name = "Placeholder"
"#;

#[test]
fn test_help_shows_dry_run_flag() {
    feeder_cmd()
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--limit"));
}

#[test]
fn test_list_shows_configured_feeds() {
    let temp_dir = TempDir::new().unwrap();
    let feeds = write_feeds(&temp_dir, "feeds.toml", FEEDS_TOML);

    feeder_cmd()
        .arg("list")
        .arg("--feeds")
        .arg(feeds.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("The Hacker News"))
        .stdout(predicate::str::contains("Filters: llm, prompt injection"))
        .stdout(predicate::str::contains("(none, skipped)"));
}

#[test]
fn test_list_reads_path_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let feeds = write_feeds(
        &temp_dir,
        "feeds.json",
        r#"[{"name": "OpenAI Blog", "url": "https://openai.com/blog/rss.xml"}]"#,
    );

    feeder_cmd()
        .arg("list")
        .env("FEEDER_FEEDS_PATH", feeds.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("OpenAI Blog"));
}

mod fatal_config {
    use super::*;

    #[test]
    fn test_run_without_token_fails() {
        let temp_dir = TempDir::new().unwrap();
        let feeds = write_feeds(&temp_dir, "feeds.toml", FEEDS_TOML);

        feeder_cmd()
            .arg("run")
            .arg("--feeds")
            .arg(feeds.to_str().unwrap())
            .env("NOTION_DATABASE_ID", "db-123")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Missing environment variable: NOTION_TOKEN",
            ))
            .stdout(predicate::str::contains("Fetching feeds...").not());
    }

    #[test]
    fn test_run_without_database_id_fails() {
        let temp_dir = TempDir::new().unwrap();
        let feeds = write_feeds(&temp_dir, "feeds.toml", FEEDS_TOML);

        feeder_cmd()
            .arg("run")
            .arg("--feeds")
            .arg(feeds.to_str().unwrap())
            .env("NOTION_TOKEN", "secret_test")
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "Missing environment variable: NOTION_DATABASE_ID",
            ));
    }

    #[test]
    fn test_missing_feed_list_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        feeder_cmd()
            .arg("run")
            .arg("--feeds")
            .arg(missing.to_str().unwrap())
            .env("NOTION_TOKEN", "secret_test")
            .env("NOTION_DATABASE_ID", "db-123")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Feed list not found"));
    }

    #[test]
    fn test_malformed_feed_list_fails() {
        let temp_dir = TempDir::new().unwrap();
        let feeds = write_feeds(&temp_dir, "feeds.toml", "[[feeds]]\nname = ");

        feeder_cmd()
            .arg("list")
            .arg("--feeds")
            .arg(feeds.to_str().unwrap())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Feed list is malformed"));
    }

    #[test]
    fn test_invalid_feed_url_fails() {
        let temp_dir = TempDir::new().unwrap();
        let feeds = write_feeds(
            &temp_dir,
            "feeds.toml",
            "[[feeds]]\nname = \"Broken\"\nurl = \"not a url\"\n",
        );

        feeder_cmd()
            .arg("list")
            .arg("--feeds")
            .arg(feeds.to_str().unwrap())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid feed URL"));
    }
}

#[test]
fn test_run_with_no_feeds_exits_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let feeds = write_feeds(&temp_dir, "feeds.toml", "");

    feeder_cmd()
        .arg("run")
        .arg("--dry-run")
        .arg("--feeds")
        .arg(feeds.to_str().unwrap())
        .env("NOTION_TOKEN", "secret_test")
        .env("NOTION_DATABASE_ID", "db-123")
        .assert()
        .success()
        .stdout(predicate::str::contains("No feeds configured"));
}

#[test]
fn test_list_reads_toml_without_extension() {
    let temp_dir = TempDir::new().unwrap();
    let feeds = write_feeds(&temp_dir, "feeds", FEEDS_TOML);

    feeder_cmd()
        .arg("list")
        .arg("--feeds")
        .arg(feeds.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("The Hacker News"));
}

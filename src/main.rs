use clap::Parser;
use tracing_subscriber::EnvFilter;

use notion_feeder::cli::{Cli, Commands};
use notion_feeder::config::{load_feeds, resolve_feeds_path, Config};
use notion_feeder::domain::FeedConfig;
use notion_feeder::errors::FeederResult;
use notion_feeder::services::{FeedStatus, RunSummary, SyncOptions, SyncService};
use notion_feeder::sources::RssAtomSource;
use notion_feeder::storage::NotionDatabase;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("notion_feeder={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> FeederResult<()> {
    Config::load_dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load feed list
    let feeds_path = resolve_feeds_path(cli.feeds.as_deref());
    let feeds = load_feeds(&feeds_path)?;

    match cli.command {
        Commands::List => cmd_list(&feeds),
        Commands::Run { dry_run, limit } => cmd_run(&feeds, dry_run, limit),
    }
}

fn cmd_list(feeds: &[FeedConfig]) -> FeederResult<()> {
    if feeds.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    println!("Configured feeds:\n");
    for feed in feeds {
        println!("  {}", feed.name);
        match &feed.url {
            Some(url) => println!("    URL: {}", url),
            None => println!("    URL: (none, skipped)"),
        }
        if !feed.filters.is_empty() {
            println!("    Filters: {}", feed.filters.join(", "));
        }
        println!();
    }

    Ok(())
}

fn cmd_run(feeds: &[FeedConfig], dry_run: bool, limit: usize) -> FeederResult<()> {
    // Credentials are required before anything touches the network
    let config = Config::from_env()?;

    if feeds.is_empty() {
        println!("No feeds configured.");
        return Ok(());
    }

    let database = NotionDatabase::new(&config)?;
    let options = SyncOptions {
        dry_run,
        max_entries_per_feed: limit,
    };
    let service = SyncService::new(RssAtomSource::new(), &database, options);

    println!("Fetching feeds...\n");
    let summary = service.run(&database, feeds);

    print_summary(&summary, dry_run);
    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    for report in &summary.feeds {
        match &report.status {
            FeedStatus::NoUrl => {
                println!("{}: skipped (no URL)\n", report.name);
                continue;
            }
            FeedStatus::FetchFailed(reason) => {
                println!("{}: skipped ({})\n", report.name, reason);
                continue;
            }
            FeedStatus::Processed => {}
        }

        println!("{} ({}):", report.name, report.tally.describe());
        for warning in &report.warnings {
            println!("  ! {}", warning);
        }
        for record in &report.written {
            if dry_run {
                println!("  [DRY RUN] {} {}", record.title, record.url);
            } else {
                println!("  + {} {}", record.title, record.url);
            }
        }
        println!();
    }

    if dry_run {
        println!("Dry run complete: {}.", summary.totals.describe());
    } else {
        println!("Run complete: {}.", summary.totals.describe());
    }
}

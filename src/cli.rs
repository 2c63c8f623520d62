// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands share the same crawl options:
//   site-scout text  https://example.com            -> prints the collected text
//   site-scout pages https://example.com --json     -> prints what happened per page
//
// The option defaults come from the constants in config.rs, so the CLI and
// the library can't drift apart.
// =============================================================================

use crate::config::{
    CrawlConfig, DEFAULT_DELAY_MS, DEFAULT_MAX_CHARS, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_SECS,
};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "site-scout",
    version,
    about = "Collect the visible text of a website's own pages",
    long_about = "site-scout crawls a website breadth-first, never leaving the starting host, \
                  and collects the visible text of up to --max-pages pages into a single \
                  excerpt of at most --max-chars characters."
)]
pub struct Cli {
    /// Log every fetch (same as RUST_LOG=site_scout=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the collected text for each website
    ///
    /// Example: site-scout text https://example.com --max-chars 2000
    Text {
        #[command(flatten)]
        crawl: CrawlArgs,
    },

    /// Print which pages were visited and why any were skipped
    ///
    /// Example: site-scout pages https://example.com --max-pages 25 --json
    Pages {
        #[command(flatten)]
        crawl: CrawlArgs,

        /// Output the full report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Website URL(s) to crawl (e.g., https://example.com)
    ///
    /// Repeating a URL reuses the first crawl's result.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Maximum number of pages to attempt per website
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Maximum number of characters of text per website
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
    pub max_chars: usize,

    /// Timeout for each request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Number of pages fetched at the same time
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Stop the whole crawl after this many seconds and keep what was collected
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Pause before each request after the first, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// User-Agent header to send (default: site-scout/<version>)
    #[arg(long)]
    pub user_agent: Option<String>,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        let config = CrawlConfig::default()
            .with_max_pages(self.max_pages)
            .with_max_chars(self.max_chars)
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
            .with_concurrency(self.concurrency)
            .with_deadline(self.deadline_secs.map(Duration::from_secs))
            .with_politeness_delay(Duration::from_millis(self.delay_ms));

        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.as_str()),
            None => config,
        }
    }
}

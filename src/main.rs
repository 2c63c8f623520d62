// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only carries results)
// 3. Crawl each requested website, reusing results for repeated URLs
// 4. Print the text or the per-page report
// 5. Exit with proper code (0 = text collected, 1 = no text, 2 = error)
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod page;
mod session;

use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use crawl::{CrawlReport, PageOutcome};
use error::CrawlError;
use session::CrawlCache;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use anyhow::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr. RUST_LOG wins unless --verbose was given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("site_scout=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("site_scout=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Returns:
//   Ok(0) = every website produced some text
//   Ok(1) = at least one website produced no text
//   Ok(2) = at least one URL was rejected before crawling
async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Text { crawl } => {
            let reports = crawl_all(&crawl).await;
            let many = reports.len() > 1;

            for (url, report) in &reports {
                let Ok(report) = report else { continue };
                if many {
                    println!("==> {} <==", url);
                }
                println!("{}", report.corpus);
            }

            Ok(exit_code(&reports))
        }
        Commands::Pages { crawl, json } => {
            let reports = crawl_all(&crawl).await;

            if json {
                let ok: Vec<&CrawlReport> = reports
                    .iter()
                    .filter_map(|(_, r)| r.as_ref().ok().map(|r| &**r))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&ok)?);
            } else {
                for (_, report) in &reports {
                    if let Ok(report) = report {
                        print_table(report);
                    }
                }
            }

            Ok(exit_code(&reports))
        }
    }
}

type UrlReport = (String, Result<Arc<CrawlReport>, CrawlError>);

// Crawls every URL in order, sharing one cache so duplicates are free
async fn crawl_all(args: &CrawlArgs) -> Vec<UrlReport> {
    let config = args.to_config();
    let mut cache = CrawlCache::new();
    let mut reports = Vec::new();

    for url in &args.urls {
        let result = cache.get_or_crawl(url, &config).await;
        if let Err(e) = &result {
            tracing::error!("{}", e);
        }
        reports.push((url.clone(), result));
    }

    reports
}

fn exit_code(reports: &[UrlReport]) -> i32 {
    if reports.iter().any(|(_, r)| r.is_err()) {
        2
    } else if reports
        .iter()
        .any(|(_, r)| r.as_ref().map_or(false, |r| r.corpus.is_empty()))
    {
        1
    } else {
        0
    }
}

// Prints one crawl as a human-readable table in the terminal
fn print_table(report: &CrawlReport) {
    println!("🔍 {}", report.root);
    println!("{:<60} {:<10} {:<30}", "URL", "STATUS", "DETAIL");
    println!("{}", "=".repeat(100));

    for page in &report.pages {
        // Truncate URL if too long for display
        let url_display = if page.url.chars().count() > 57 {
            format!("{}...", page.url.chars().take(57).collect::<String>())
        } else {
            page.url.clone()
        };

        let (status, detail) = match &page.outcome {
            PageOutcome::Fetched {
                chars,
                links,
                queued,
            } => (
                "✅ OK".to_string(),
                format!("{} chars, {} links ({} new)", chars, links, queued),
            ),
            PageOutcome::Redirected { location, queued } => (
                "↪ MOVED".to_string(),
                format!("{}{}", location, if *queued { "" } else { " (not followed)" }),
            ),
            PageOutcome::Failed { failure } => ("❌ SKIP".to_string(), failure.to_string()),
        };

        println!("{:<60} {:<10} {:<30}", url_display, status, detail);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Fetched: {}", report.fetched_count());
    println!("   ↪ Redirected: {}", report.redirected_count());
    println!("   ❌ Skipped: {}", report.failed_count());
    println!("   📝 Characters: {}", report.corpus.chars().count());
    println!("   🛑 Stopped: {:?}", report.stop);
    println!();
}

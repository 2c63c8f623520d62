// src/crawl/controller.rs
// =============================================================================
// This module drives a crawl with a breadth-first approach.
//
// How it works:
// 1. Start with the seed URL on the frontier
// 2. Claim URLs (budget check + mark visited in one step) and fetch them,
//    up to `concurrency` at a time
// 3. For every page that comes back as HTML, keep its visible text and offer
//    its links to the frontier (only same-host, never-seen URLs get queued)
//    A redirect's target is offered the same way; it costs a claim of its own
// 4. Repeat until the page budget is spent, the frontier runs dry, or the
//    overall deadline passes
// 5. Join the texts in visit order and cut the result to max_chars
//
// Failure handling:
// - A bad page (timeout, 404, PDF, ...) is logged, recorded and skipped
// - Only an unusable seed URL or config fails the crawl, before any request
//
// Rust concepts:
// - FuturesUnordered: a set of futures polled together, yielding whichever
//   finishes first
// - tokio::select!: waits on several futures and runs the first that's ready
// =============================================================================

use super::corpus::Corpus;
use super::frontier::{Frontier, Visit};
use super::report::{CrawlReport, PageOutcome, PageRecord, StopReason};
use super::scope::Scope;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::page::{build_client, extract_links, extract_text, fetch_page, FetchFailure, Fetched};
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

// What a fetcher brings back for one claimed URL
#[derive(Debug)]
struct PageResult {
    visit: Visit,
    outcome: Result<Visited, FetchFailure>,
}

#[derive(Debug)]
enum Visited {
    Html { text: String, links: Vec<Url> },
    Redirect(Url),
}

// Crawls a website and collects the visible text of its pages
//
// Parameters:
//   root_url: The URL to start from; it also fixes the host we stay on
//   config: Budgets, timeouts and pool size
//
// Returns: a report with one record per attempted page and the corpus
//
// Example:
//   max_pages=1: Only the seed page is fetched, whatever it links to
//   max_pages=10: The seed page, then its links, then their links, ...
//                 until ten URLs have been attempted
pub async fn crawl(root_url: &str, config: &CrawlConfig) -> Result<CrawlReport, CrawlError> {
    config.validate()?;

    let root = parse_root(root_url)?;
    let scope = Scope::from_root(&root)?;
    let host = scope.host().to_string();

    // One client for the whole crawl, so connections get reused
    let client = build_client(config)?;

    info!(
        root = %root,
        host = %host,
        max_pages = config.max_pages,
        max_chars = config.max_chars,
        concurrency = config.concurrency,
        "starting crawl"
    );

    let deadline = config.deadline.map(|limit| Instant::now() + limit);

    let mut frontier = Frontier::new(&root, scope, config.max_pages);
    let mut corpus = Corpus::new();
    let mut outcomes: HashMap<usize, PageOutcome> = HashMap::new();
    let mut in_flight = FuturesUnordered::new();
    let mut deadline_hit = false;

    loop {
        if deadline.map_or(false, |at| Instant::now() >= at) {
            deadline_hit = true;
            break;
        }

        // Fill the pool from the front of the frontier
        while in_flight.len() < config.concurrency {
            let Some(visit) = frontier.claim_next() else {
                break;
            };
            debug!(seq = visit.seq, url = %visit.url, "claimed");
            in_flight.push(visit_page(&client, visit, config.politeness_delay));
        }

        let next = match deadline {
            Some(at) => tokio::select! {
                next = in_flight.next() => next,
                _ = tokio::time::sleep_until(at) => {
                    deadline_hit = true;
                    break;
                }
            },
            None => in_flight.next().await,
        };

        // Nothing in flight and nothing left to claim
        let Some(result) = next else {
            break;
        };

        let seq = result.visit.seq;
        match result.outcome {
            Ok(Visited::Html { text, links }) => {
                let queued = links.iter().filter(|link| frontier.offer(link)).count();

                let outcome = PageOutcome::Fetched {
                    chars: text.chars().count(),
                    links: links.len(),
                    queued,
                };
                debug!(url = %result.visit.url, ?outcome, "page done");

                corpus.insert(seq, text);
                outcomes.insert(seq, outcome);
            }
            // Off-scope or already-seen targets are dropped here, like links
            Ok(Visited::Redirect(target)) => {
                let queued = frontier.offer(&target);
                debug!(url = %result.visit.url, location = %target, queued, "redirect");

                outcomes.insert(
                    seq,
                    PageOutcome::Redirected {
                        location: target.to_string(),
                        queued,
                    },
                );
            }
            Err(failure) => {
                warn!(url = %result.visit.url, reason = %failure, "skipping page");
                outcomes.insert(seq, PageOutcome::Failed { failure });
            }
        }
    }

    // Dropping the pool cancels whatever was still running at the deadline
    let cancelled = in_flight.len();
    drop(in_flight);

    let stop = if deadline_hit {
        StopReason::Deadline
    } else if frontier.budget_spent() && frontier.pending() > 0 {
        StopReason::PageBudget
    } else {
        StopReason::FrontierExhausted
    };

    let pages: Vec<PageRecord> = frontier
        .visit_order()
        .iter()
        .enumerate()
        .map(|(seq, url)| PageRecord {
            url: url.clone(),
            outcome: outcomes.remove(&seq).unwrap_or(PageOutcome::Failed {
                failure: FetchFailure::Cancelled,
            }),
        })
        .collect();

    let fetched_pages = corpus.page_count();
    let corpus = corpus.finish(config.max_chars);

    info!(
        root = %root,
        visited = frontier.visited_count(),
        fetched_pages,
        cancelled,
        left_in_queue = frontier.pending(),
        chars = corpus.chars().count(),
        ?stop,
        "crawl finished"
    );

    Ok(CrawlReport {
        root: root.to_string(),
        stop,
        pages,
        corpus,
    })
}

// Validates the seed URL before anything touches the network
fn parse_root(root_url: &str) -> Result<Url, CrawlError> {
    let mut root = Url::parse(root_url.trim()).map_err(|source| CrawlError::InvalidUrl {
        url: root_url.to_string(),
        source,
    })?;

    if root.scheme() != "http" && root.scheme() != "https" {
        return Err(CrawlError::UnsupportedScheme {
            url: root_url.to_string(),
            scheme: root.scheme().to_string(),
        });
    }

    root.set_fragment(None);
    Ok(root)
}

// Fetches one claimed URL and, if it is HTML, extracts text and links
//
// Links are resolved against the URL the response came from. The politeness delay is taken before every fetch except the seed's, so a
// fetch cancelled at the deadline never wastes a completed download.
async fn visit_page(client: &Client, visit: Visit, delay: Duration) -> PageResult {
    if visit.seq > 0 && !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let outcome = fetch_page(client, &visit.url)
        .await
        .map(|fetched| match fetched {
            Fetched::Page(page) => Visited::Html {
                text: extract_text(&page.body),
                links: extract_links(&page.body, &page.url),
            },
            Fetched::Redirect(target) => Visited::Redirect(target),
        });

    PageResult { visit, outcome }
}

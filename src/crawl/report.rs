// src/crawl/report.rs
// =============================================================================
// What a crawl hands back to its caller.
//
// Besides the size-capped corpus, the report keeps one record per attempted
// page, so an empty corpus can be explained ("every page was a 404") instead
// of just being empty.
// =============================================================================

use crate::page::FetchFailure;
use serde::Serialize;

// What happened to one attempted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Page was HTML and contributed its text
    Fetched {
        /// Visible characters extracted from the page
        chars: usize,
        /// Distinct http(s) links found on the page
        links: usize,
        /// How many of those were new, in-scope, and queued
        queued: usize,
    },
    /// Server pointed elsewhere; the target was offered to the frontier like a link
    Redirected {
        location: String,
        /// Whether the target was new and in scope
        queued: bool,
    },
    /// Page was skipped; it still used up one unit of the page budget
    Failed { failure: FetchFailure },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

impl PageRecord {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, PageOutcome::Fetched { .. })
    }
}

// Why the crawl loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every reachable in-scope page was attempted
    FrontierExhausted,
    /// max_pages URLs were attempted while more were still waiting
    PageBudget,
    /// The overall deadline expired first
    Deadline,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The seed URL after normalization
    pub root: String,
    pub stop: StopReason,
    /// One record per attempted URL, in visit order
    pub pages: Vec<PageRecord>,
    /// Visible text of the fetched pages, truncated to max_chars characters
    pub corpus: String,
}

impl CrawlReport {
    pub fn fetched_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_ok()).count()
    }

    pub fn redirected_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| matches!(p.outcome, PageOutcome::Redirected { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.pages.len() - self.fetched_count() - self.redirected_count()
    }
}

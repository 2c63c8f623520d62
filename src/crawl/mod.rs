// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL
// - Same-host restriction (never fetches another site)
// - Page budget and character budget
// - Optional pool of concurrent fetches and an overall deadline
// - Per-page outcomes, so an empty result can be explained
//
// Submodules:
// - scope: which links may be followed
// - frontier: queue, visited set and page budget
// - corpus: collects page text and applies the character budget
// - report: what the crawl returns
// - controller: the crawl loop itself
// =============================================================================

mod controller;
mod corpus;
mod frontier;
mod report;
mod scope;

// Re-export the crawl entry points and the types callers see
pub use controller::crawl;
pub use report::{CrawlReport, PageOutcome};

// src/crawl/frontier.rs
// =============================================================================
// The crawl's bookkeeping: which URLs are waiting, which were attempted, and
// how much of the page budget is left.
//
// Rules this type enforces:
// - A URL is handed out (claimed) at most once per crawl
// - Claiming checks the budget and marks the URL visited in the same step,
//   so the number of claims can never exceed max_pages
// - Waiting URLs come out first-in-first-out (breadth-first order)
//
// Only the controller touches a Frontier, so it needs no locking.
// =============================================================================

use super::scope::{is_eligible, Scope};
use std::collections::{HashSet, VecDeque};
use url::Url;

// A URL handed to a fetcher, numbered in claim order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub seq: usize,
    pub url: String,
}

#[derive(Debug)]
pub struct Frontier {
    scope: Scope,
    queue: VecDeque<String>,
    queued: HashSet<String>,
    visited: HashSet<String>,
    // visited URLs in claim order; index == Visit::seq
    order: Vec<String>,
    max_pages: usize,
}

impl Frontier {
    pub fn new(root: &Url, scope: Scope, max_pages: usize) -> Self {
        let mut frontier = Self {
            scope,
            queue: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            order: Vec::new(),
            max_pages,
        };
        frontier.queued.insert(root.to_string());
        frontier.queue.push_back(root.to_string());
        frontier
    }

    // Takes the next URL to fetch, if the budget allows one more
    //
    // Returns None when the budget is spent or nothing is waiting.
    pub fn claim_next(&mut self) -> Option<Visit> {
        while self.visited.len() < self.max_pages {
            let url = self.queue.pop_front()?;
            self.queued.remove(&url);

            if self.visited.contains(&url) {
                continue;
            }

            self.visited.insert(url.clone());
            self.order.push(url.clone());

            return Some(Visit {
                seq: self.order.len() - 1,
                url,
            });
        }
        None
    }

    // Queues a discovered link if the scope filter lets it through
    //
    // Returns: whether the link was queued
    pub fn offer(&mut self, candidate: &Url) -> bool {
        if !is_eligible(candidate, &self.scope, &self.visited, &self.queued) {
            return false;
        }
        self.queued.insert(candidate.to_string());
        self.queue.push_back(candidate.to_string());
        true
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn budget_spent(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    // Every claimed URL, in the order it was claimed
    pub fn visit_order(&self) -> &[String] {
        &self.order
    }
}

// src/crawl/scope.rs
// =============================================================================
// This module decides which discovered links the crawler may follow.
//
// The scope is the seed URL's host (plus an explicit port, if it had one).
// Hosts are compared as exact strings: "blog.example.com" is NOT inside the
// scope of "example.com". http and https on the same host are the same scope.
// =============================================================================

use crate::error::CrawlError;
use std::collections::HashSet;
use url::Url;

// The host a crawl is restricted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    host: String,
    port: Option<u16>,
}

impl Scope {
    // Builds the scope from the seed URL
    //
    // Fails if the URL has no host (e.g. "data:text/plain,hi")
    pub fn from_root(root: &Url) -> Result<Self, CrawlError> {
        let host = root
            .host_str()
            .ok_or_else(|| CrawlError::MissingHost(root.to_string()))?;

        Ok(Self {
            host: host.to_string(),
            port: root.port(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    // Checks whether a URL is on the scope's host
    pub fn contains(&self, url: &Url) -> bool {
        matches!(url.scheme(), "http" | "https")
            && url.host_str() == Some(self.host.as_str())
            && url.port() == self.port
    }
}

// Decides whether a discovered link should be queued
//
// Parameters:
//   candidate: an absolute URL (already resolved by the link extractor)
//   scope: the crawl's host restriction
//   visited: URLs already taken off the frontier
//   queued: URLs waiting on the frontier
//
// Returns: true only for in-scope URLs the crawl hasn't met before
pub fn is_eligible(
    candidate: &Url,
    scope: &Scope,
    visited: &HashSet<String>,
    queued: &HashSet<String>,
) -> bool {
    scope.contains(candidate)
        && !visited.contains(candidate.as_str())
        && !queued.contains(candidate.as_str())
}

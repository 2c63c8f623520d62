// src/session.rs
// =============================================================================
// Remembers crawl results for the rest of a session.
//
// The crawler itself keeps no state between calls. Callers that may ask for
// the same site twice (the CLI with repeated seed URLs, an interactive front
// end) keep a CrawlCache and go through `get_or_crawl`.
//
// Results are keyed by the seed URL AND both budgets: a 10-page crawl is not
// a valid answer for a 50-page request.
// =============================================================================

use crate::config::CrawlConfig;
use crate::crawl::{crawl, CrawlReport};
use crate::error::CrawlError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub root: String,
    pub max_pages: usize,
    pub max_chars: usize,
}

impl CacheKey {
    pub fn new(root: &str, config: &CrawlConfig) -> Self {
        Self {
            root: root.trim().to_string(),
            max_pages: config.max_pages,
            max_chars: config.max_chars,
        }
    }
}

#[derive(Debug, Default)]
pub struct CrawlCache {
    reports: HashMap<CacheKey, Arc<CrawlReport>>,
}

impl CrawlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<CrawlReport>> {
        self.reports.get(key).cloned()
    }

    pub fn insert(&mut self, key: CacheKey, report: CrawlReport) -> Arc<CrawlReport> {
        let report = Arc::new(report);
        self.reports.insert(key, Arc::clone(&report));
        report
    }

    // Returns the cached report for this seed and budgets, crawling only on a miss
    //
    // Failed crawls (invalid seed URL) are not cached.
    pub async fn get_or_crawl(
        &mut self,
        root_url: &str,
        config: &CrawlConfig,
    ) -> Result<Arc<CrawlReport>, CrawlError> {
        let key = CacheKey::new(root_url, config);

        if let Some(report) = self.get(&key) {
            debug!(root = %key.root, "using cached crawl");
            return Ok(report);
        }

        let report = crawl(root_url, config).await?;
        Ok(self.insert(key, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_key_includes_budgets() {
        let small = CrawlConfig::default().with_max_pages(2);
        let large = CrawlConfig::default().with_max_pages(20);
        assert_ne!(
            CacheKey::new("https://example.com", &small),
            CacheKey::new("https://example.com", &large)
        );
        assert_eq!(
            CacheKey::new(" https://example.com ", &small),
            CacheKey::new("https://example.com", &small)
        );
    }

    #[tokio::test]
    async fn test_repeated_seed_is_crawled_once() {
        let mut server = mockito::Server::new_async().await;
        let root = format!("{}/", server.url());
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>cached</p>")
            .expect(1)
            .create_async()
            .await;

        let config = CrawlConfig::default().with_politeness_delay(Duration::ZERO);
        let mut cache = CrawlCache::new();

        let first = cache.get_or_crawl(&root, &config).await.unwrap();
        let second = cache.get_or_crawl(&root, &config).await.unwrap();

        assert_eq!(first.corpus, "cached");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.get(&CacheKey::new(&root, &config)).is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_seed_is_not_cached() {
        let config = CrawlConfig::default();
        let mut cache = CrawlCache::new();
        let result = cache.get_or_crawl("not a url", &config).await;
        assert!(result.is_err());
        assert!(cache.get(&CacheKey::new("not a url", &config)).is_none());
    }
}

// src/config.rs
// =============================================================================
// Knobs for a single crawl.
//
// The defaults are the safety limits the crawler has always used: ten pages,
// five thousand characters of text, a six second timeout per request, and a
// short pause after every fetch so we don't hammer the site.
//
// Every field has a `with_*` method so callers (the CLI, tests) can override
// just the parts they care about:
//
//   let config = CrawlConfig::default().with_max_pages(3).with_concurrency(4);
// =============================================================================

use crate::error::CrawlError;
use std::time::Duration;

/// Maximum number of distinct URLs one crawl may fetch
pub const DEFAULT_MAX_PAGES: usize = 10;

/// Maximum number of characters in the returned corpus
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 6;

/// Pause after each fetch, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 100;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Page budget: fetch attempts, successful or not
    pub max_pages: usize,
    /// Character budget for the joined corpus
    pub max_chars: usize,
    /// Timeout for one GET, including reading the body
    pub request_timeout: Duration,
    /// Number of fetches allowed in flight at once (1 = strictly sequential)
    pub concurrency: usize,
    /// Wall-clock bound for the whole crawl; None = only the page budget applies
    pub deadline: Option<Duration>,
    /// Pause after each fetch
    pub politeness_delay: Duration,
    /// Sent with every request
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_chars: DEFAULT_MAX_CHARS,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: 1,
            deadline: None,
            politeness_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            user_agent: format!("site-scout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlConfig {
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Rejects settings that could never produce a crawl.
    ///
    /// A zero character budget is allowed (it just yields an empty corpus),
    /// but a zero page budget or an empty worker pool is a caller mistake.
    pub fn validate(&self) -> Result<(), CrawlError> {
        if self.max_pages == 0 {
            return Err(CrawlError::InvalidConfig(
                "max_pages must be at least 1".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(CrawlError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(CrawlError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// src/error.rs
// =============================================================================
// Errors that stop a crawl before it starts.
//
// A crawl only fails "upfront": the seed URL can't be parsed, isn't http(s),
// has no host, the configuration is nonsense, or the HTTP client can't be
// built. Once the first request goes out, nothing is an error any more -
// bad pages become a FetchFailure inside the report (see page/fetch.rs).
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from attributes
// - #[from]: lets the ? operator convert a reqwest::Error automatically
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL could not be parsed at all
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The seed URL parsed, but it isn't something we can GET (mailto:, ftp:, ...)
    #[error("Unsupported scheme '{scheme}' in {url} (only http/https can be crawled)")]
    UnsupportedScheme { url: String, scheme: String },

    /// The seed URL has no host, so there is no scope to stay inside
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// A budget or pool size that can't produce a crawl (e.g. zero pages)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The shared HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

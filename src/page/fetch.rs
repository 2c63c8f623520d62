// src/page/fetch.rs
// =============================================================================
// This module downloads one page and decides whether it is usable HTML.
//
// Key functionality:
// - Builds the single HTTP client a crawl shares (connection pooling)
// - Makes exactly one GET per URL, never retries
// - Hands redirects back to the caller instead of following them, so the
//   target goes through the same scope and visited checks as any link
// - Rejects other non-2xx responses and anything that isn't an HTML media type
// - Turns every kind of failure into a FetchFailure value instead of an error,
//   so one bad page can never abort the whole crawl
//
// Rust concepts:
// - Result<T, E> with our own error enum as E
// - Enums with data: a response is either a page or a pointer elsewhere
// =============================================================================

use crate::config::CrawlConfig;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

// Why a page produced no text
//
// #[serde(tag, content)] renders these as {"reason": "http_status", "detail": 404}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FetchFailure {
    /// Request (or body download) took longer than the per-request timeout
    Timeout,
    /// Could not resolve hostname
    Dns,
    /// Connection refused / reset / unreachable
    Connect,
    /// Server answered with something other than 2xx (or a 3xx without a usable Location)
    HttpStatus(u16),
    /// Server answered 2xx but not with HTML (holds the Content-Type we got)
    NotHtml(String),
    /// Headers arrived but the body couldn't be read or decoded
    Body(String),
    /// Any other transport error
    Transport(String),
    /// Still in flight when the crawl deadline expired
    Cancelled,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Timeout => write!(f, "request timed out"),
            FetchFailure::Dns => write!(f, "could not resolve hostname"),
            FetchFailure::Connect => write!(f, "connection failed"),
            FetchFailure::HttpStatus(code) => write!(f, "HTTP {}", code),
            FetchFailure::NotHtml(content_type) if content_type.is_empty() => {
                write!(f, "no content type")
            }
            FetchFailure::NotHtml(content_type) => write!(f, "not HTML ({})", content_type),
            FetchFailure::Body(msg) => write!(f, "unreadable body: {}", msg),
            FetchFailure::Transport(msg) => write!(f, "{}", msg),
            FetchFailure::Cancelled => write!(f, "cancelled at deadline"),
        }
    }
}

// What a single GET produced
#[derive(Debug, Clone)]
pub enum Fetched {
    /// A 2xx HTML response
    Page(FetchedPage),
    /// A 3xx response; holds the Location resolved to an absolute URL, without fragment
    Redirect(Url),
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

// Builds the HTTP client shared by every fetch of one crawl
//
// Redirects are never followed by the client. fetch_page reports them and
// the crawl decides whether the target is worth a claim of its own.
pub fn build_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.as_str())
        .redirect(Policy::none())
        .build()
}

// Fetches one page with a single GET
//
// Returns: the HTML page or the redirect target, or the reason neither is usable
pub async fn fetch_page(client: &Client, url: &str) -> Result<Fetched, FetchFailure> {
    let response = client.get(url).send().await.map_err(categorize_error)?;

    let status = response.status();
    if status.is_redirection() {
        let target = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|location| response.url().join(location.trim()).ok());

        // 304 and friends carry no Location
        let Some(mut target) = target else {
            return Err(FetchFailure::HttpStatus(status.as_u16()));
        };
        target.set_fragment(None);

        debug!(url, status = status.as_u16(), location = %target, "redirected");
        return Ok(Fetched::Redirect(target));
    }

    if !status.is_success() {
        return Err(FetchFailure::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Err(FetchFailure::NotHtml(content_type));
    }

    let page_url = response.url().clone();
    let body = response.text().await.map_err(categorize_error)?;

    debug!(
        url,
        content_type = %content_type,
        bytes = body.len(),
        "fetched page"
    );

    Ok(Fetched::Page(FetchedPage {
        url: page_url,
        body,
    }))
}

// Checks whether a Content-Type header names an HTML media type
//
// Parameters like "; charset=utf-8" are ignored, and the comparison is
// case-insensitive ("Text/HTML" is still HTML).
fn is_html(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    media_type == "text/html" || media_type == "application/xhtml+xml"
}

// Categorizes reqwest errors into failure reasons
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Body that isn't valid text
//
// reqwest has no is_dns(); resolver failures are connect errors whose source
// chain mentions DNS, so telling Dns from Connect is best-effort.
fn categorize_error(error: reqwest::Error) -> FetchFailure {
    // The Debug form includes the whole source chain, which is where the
    // resolver's message ends up
    let details = format!("{:?}", error).to_lowercase();

    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        if details.contains("dns") || details.contains("resolve") {
            FetchFailure::Dns
        } else {
            FetchFailure::Connect
        }
    } else if error.is_body() || error.is_decode() {
        FetchFailure::Body(error.to_string())
    } else {
        FetchFailure::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_client() -> Client {
        let config = CrawlConfig::default().with_request_timeout(Duration::from_secs(2));
        build_client(&config).unwrap()
    }

    fn redirect_target(result: Result<Fetched, FetchFailure>) -> Url {
        match result {
            Ok(Fetched::Redirect(target)) => target,
            other => panic!("expected a redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Text/HTML"));
        assert!(is_html("application/xhtml+xml"));
        assert!(!is_html("application/json"));
        assert!(!is_html("text/plain"));
        assert!(!is_html(""));
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<p>hello</p>")
            .expect(1)
            .create_async()
            .await;

        let root = format!("{}/", server.url());
        let Ok(Fetched::Page(page)) = fetch_page(&test_client(), &root).await else {
            panic!("expected an HTML page");
        };
        assert_eq!(page.body, "<p>hello</p>");
        assert_eq!(page.url.as_str(), root);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "text/html")
            .create_async()
            .await;

        let url = format!("{}/missing", server.url());
        let result = fetch_page(&test_client(), &url).await;
        assert_eq!(result.unwrap_err(), FetchFailure::HttpStatus(404));
    }

    #[tokio::test]
    async fn test_non_html_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/logo.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(vec![0x89, 0x50, 0x4e, 0x47])
            .create_async()
            .await;

        let url = format!("{}/logo.png", server.url());
        let result = fetch_page(&test_client(), &url).await;
        assert_eq!(
            result.unwrap_err(),
            FetchFailure::NotHtml("image/png".to_string())
        );
    }

    #[tokio::test]
    async fn test_redirect_is_reported_not_followed() {
        let mut server = mockito::Server::new_async().await;
        let _old = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new#top")
            .create_async()
            .await;
        let new = server
            .mock("GET", "/new")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>moved</p>")
            .expect(0)
            .create_async()
            .await;

        let url = format!("{}/old", server.url());
        let target = redirect_target(fetch_page(&test_client(), &url).await);
        assert_eq!(target.as_str(), format!("{}/new", server.url()));
        new.assert_async().await;
    }

    #[tokio::test]
    async fn test_off_host_redirect_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/away")
            .with_status(302)
            .with_header("location", "https://elsewhere.invalid/")
            .create_async()
            .await;

        let url = format!("{}/away", server.url());
        let target = redirect_target(fetch_page(&test_client(), &url).await);
        assert_eq!(target.as_str(), "https://elsewhere.invalid/");
    }

    #[tokio::test]
    async fn test_redirect_without_location_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/cached")
            .with_status(304)
            .create_async()
            .await;

        let url = format!("{}/cached", server.url());
        let result = fetch_page(&test_client(), &url).await;
        assert_eq!(result.unwrap_err(), FetchFailure::HttpStatus(304));
    }

    #[tokio::test]
    async fn test_refused_connection_is_failure() {
        // Grab a free port, then close it so nothing is listening there
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{}/", addr);
        let result = fetch_page(&test_client(), &url).await;
        assert_eq!(result.unwrap_err(), FetchFailure::Connect);
    }

    #[tokio::test]
    async fn test_unknown_host_is_dns_failure() {
        // .invalid is reserved and never resolves
        let config = CrawlConfig::default().with_request_timeout(Duration::from_secs(5));
        let client = build_client(&config).unwrap();

        let result = fetch_page(&client, "http://nonexistent.invalid/").await;
        assert_eq!(result.unwrap_err(), FetchFailure::Dns);
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(FetchFailure::HttpStatus(404).to_string(), "HTTP 404");
        assert_eq!(
            FetchFailure::NotHtml("application/pdf".to_string()).to_string(),
            "not HTML (application/pdf)"
        );
        assert_eq!(FetchFailure::NotHtml(String::new()).to_string(), "no content type");
    }
}

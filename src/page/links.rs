// src/page/links.rs
// =============================================================================
// This module finds the links on an HTML page.
//
// We use the `scraper` crate to select every anchor-like element that has an
// href, and the `url` crate to resolve each href against the page it came
// from - exactly the way a browser would:
//
//   base = "https://example.com/docs/intro"
//   "/about"             -> https://example.com/about
//   "../pricing"         -> https://example.com/pricing
//   "//cdn.example.com/" -> https://cdn.example.com/
//   "#team"              -> https://example.com/docs/intro   (fragment dropped)
//
// Whether a link is worth crawling (same host, not seen yet) is NOT decided
// here - that's the scope filter's job in crawl/scope.rs.
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

// Extracts all http(s) links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL the page was served from (for resolving relative links)
//
// Returns: absolute URLs without fragments, each once, in document order
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    // The selector is a constant and known to be valid
    let selector = Selector::parse("a[href], area[href]").expect("static link selector");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        // Malformed hrefs are simply dropped
        let Some(url) = resolve_link(base, href) else {
            continue;
        };

        if seen.insert(url.as_str().to_string()) {
            links.push(url);
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute, fragment-free URL
//
// Returns: None for unparseable hrefs and for anything that isn't http/https
// (mailto:, tel:, javascript:, data:, ...)
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href.trim()).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // "#section" points at the page itself, not a new page
    url.set_fragment(None);

    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/intro").unwrap()
    }

    fn strings(links: Vec<Url>) -> Vec<String> {
        links.into_iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_resolve_absolute_link() {
        let result = resolve_link(&base(), "https://other.com");
        assert_eq!(result.unwrap().as_str(), "https://other.com/");
    }

    #[test]
    fn test_resolve_relative_links() {
        assert_eq!(
            resolve_link(&base(), "/about").unwrap().as_str(),
            "https://example.com/about"
        );
        assert_eq!(
            resolve_link(&base(), "../pricing").unwrap().as_str(),
            "https://example.com/pricing"
        );
        assert_eq!(
            resolve_link(&base(), "setup").unwrap().as_str(),
            "https://example.com/docs/setup"
        );
    }

    #[test]
    fn test_resolve_protocol_relative_link() {
        let result = resolve_link(&base(), "//cdn.example.com/app.html");
        assert_eq!(result.unwrap().as_str(), "https://cdn.example.com/app.html");
    }

    #[test]
    fn test_fragment_resolves_to_page_itself() {
        assert_eq!(resolve_link(&base(), "#team").unwrap(), base());
        assert_eq!(
            resolve_link(&base(), "/about#history").unwrap().as_str(),
            "https://example.com/about"
        );
    }

    #[test]
    fn test_skip_non_http_schemes() {
        assert_eq!(resolve_link(&base(), "mailto:test@example.com"), None);
        assert_eq!(resolve_link(&base(), "tel:+15551234"), None);
        assert_eq!(resolve_link(&base(), "javascript:void(0)"), None);
    }

    #[test]
    fn test_skip_malformed_href() {
        assert_eq!(resolve_link(&base(), "http://[::1"), None);
    }

    #[test]
    fn test_extract_dedupes_in_document_order() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://external.com">External</a>
            <a href="/about#team">Team</a>
            <map><area href="/map-target"></map>
            <a>no href</a>
            <a href="mailto:hi@example.com">Mail</a>
        "#;
        let links = extract_links(html, &base());
        assert_eq!(
            strings(links),
            vec![
                "https://example.com/about",
                "https://external.com/",
                "https://example.com/map-target",
            ]
        );
    }
}

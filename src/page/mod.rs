// src/page/mod.rs
// =============================================================================
// Everything the crawler does with a single page.
//
// Submodules:
// - fetch: One bounded GET, validated as HTML or reported as a redirect
// - text: Visible text of an HTML document
// - links: Absolute link targets found on an HTML document
//
// None of these know about the frontier, the visited set or the budgets.
// =============================================================================

mod fetch;
mod links;
mod text;

pub use fetch::{build_client, fetch_page, FetchFailure, Fetched};
pub use links::extract_links;
pub use text::extract_text;

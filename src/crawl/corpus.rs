// src/crawl/corpus.rs
// =============================================================================
// Accumulates page text and produces the final, size-capped string.
//
// Pages may finish out of order when several fetches run at once, so each
// text is stored under its visit number and joined in visit order at the end.
// The character budget is applied to the joined string, which can cut the
// last page mid-sentence - the result is an excerpt, not a document.
// =============================================================================

use std::collections::BTreeMap;

/// Placed between the texts of consecutive pages
pub const PAGE_SEPARATOR: &str = " \n";

#[derive(Debug, Default)]
pub struct Corpus {
    pages: BTreeMap<usize, String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    // Records the text of the page visited as number `seq`
    //
    // A page with no visible text still takes its slot, so it shows up as a
    // bare separator in the joined result.
    pub fn insert(&mut self, seq: usize, text: String) {
        self.pages.insert(seq, text);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    // Joins all pages in visit order and keeps the first `max_chars` characters
    //
    // Characters, not bytes: multi-byte text is never split inside a character.
    pub fn finish(self, max_chars: usize) -> String {
        let joined = self
            .pages
            .into_values()
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);

        truncate_chars(joined, max_chars)
    }
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_index);
    }
    text
}

// src/page/text.rs
// =============================================================================
// This module turns an HTML page into the text a visitor would read.
//
// How it works:
// 1. Parse the HTML into a DOM with `scraper`
// 2. Walk every text node in document order
// 3. Drop text that lives inside elements that are never rendered
//    (<script>, <style>, <noscript>, <template>)
// 4. Trim each piece and join them with single spaces
//
// The function is pure: the same bytes in always give the same string out.
// =============================================================================

use scraper::{Html, Node};

// Elements whose contents never show up on screen
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

// Extracts visible text from an HTML document
//
// Example:
//   html = "<h1> Hello </h1><script>x()</script><p>world</p>"
//   result = "Hello world"
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut pieces = Vec::new();

    for node in document.tree.root().descendants() {
        let text = match node.value() {
            Node::Text(text) => text.trim(),
            _ => continue,
        };

        if text.is_empty() {
            continue;
        }

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()))
        });

        if !hidden {
            pieces.push(text);
        }
    }

    pieces.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraphs() {
        let html = "<html><body><h1>Acme</h1><p>We build rockets.</p></body></html>";
        assert_eq!(extract_text(html), "Acme We build rockets.");
    }

    #[test]
    fn test_strips_scripts_and_styles() {
        let html = r#"
            <html>
              <head>
                <title>Acme Corp</title>
                <style>body { color: red; }</style>
                <script>var tracking = "secret";</script>
              </head>
              <body>
                <p>Visible</p>
                <noscript>Enable JavaScript</noscript>
                <template><p>Not rendered</p></template>
              </body>
            </html>
        "#;
        let text = extract_text(html);
        assert_eq!(text, "Acme Corp Visible");
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_trims_and_joins_with_single_spaces() {
        let html = "<div>\n   one   </div><span>\ttwo\n</span><b>three</b>";
        assert_eq!(extract_text(html), "one two three");
    }

    #[test]
    fn test_preserves_document_order() {
        let html = "<ul><li>first</li><li>second <em>inner</em> tail</li></ul><p>last</p>";
        assert_eq!(extract_text(html), "first second inner tail last");
    }

    #[test]
    fn test_same_input_same_output() {
        let html = "<p>alpha</p><script>beta()</script><p>gamma</p>";
        assert_eq!(extract_text(html), extract_text(html));
    }

    #[test]
    fn test_empty_and_broken_markup() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<p>unclosed <b>tags"), "unclosed tags");
    }
}

//! HTML to plain page text.
//!
//! Uses `scraper` for parsing. The output is one text node per line, which
//! is the layout the segmenter and the line rules expect.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

/// Elements whose text never reaches the page text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

static PAGE_WEEK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)vecka\s+(\d+)").unwrap());

/// Convert an HTML document to newline-separated text.
///
/// Text nodes are trimmed and empty ones dropped. Malformed HTML is parsed
/// best-effort.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }
    lines.join("\n")
}

/// Week number the page announces for itself (`Vecka 6`), if any.
pub fn extract_page_week(text: &str) -> Option<u32> {
    PAGE_WEEK.captures(text)?.get(1)?.as_str().parse().ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_nodes_one_per_line() {
        let html = "<html><body><h1>Vecka 6</h1><h2>Matematik</h2><p>Prov fredag</p></body></html>";
        assert_eq!(html_to_text(html), "Vecka 6\nMatematik\nProv fredag");
    }

    #[test]
    fn script_style_noscript_dropped() {
        let html = r"<html><head><style>p { color: red }</style><script>var prov = 1;</script></head>
            <body><noscript>Aktivera JavaScript</noscript><p>Läxa v.6</p></body></html>";
        assert_eq!(html_to_text(html), "Läxa v.6");
    }

    #[test]
    fn entities_decoded() {
        assert_eq!(html_to_text("<p>Idrott &amp; h&auml;lsa</p>"), "Idrott & hälsa");
    }

    #[test]
    fn malformed_html_best_effort() {
        let text = html_to_text("<div><p>Unclosed<b>Bold</div>");
        assert!(text.contains("Unclosed"));
        assert!(text.contains("Bold"));
    }

    #[test]
    fn empty_document() {
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn page_week_found() {
        assert_eq!(extract_page_week("Veckobrev\nVECKA 12\nvecka 13"), Some(12));
        assert_eq!(extract_page_week("v.6"), None);
    }
}

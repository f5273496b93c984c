//! The highlight pipeline: segment, filter, window, join, dedup.

use std::fmt::Display;

use tracing::{debug, warn};
use veckobrev_core::SchoolInfo;

use crate::context::{is_week_range_marker, join_context};
use crate::dedup::dedup;
use crate::page::extract_page_week;
use crate::relevance::{classify, clean_line};
use crate::rules::ExtractionRules;
use crate::segment::segment;
use crate::window::decide;

/// Who a page belongs to and where it came from.
#[derive(Clone, Copy, Debug)]
pub struct PageSource<'a> {
    /// Person the page belongs to.
    pub person_name: &'a str,
    /// Class label shown next to the name.
    pub class_label: Option<&'a str>,
    /// Where the text was fetched from.
    pub url: &'a str,
}

/// Turn page text into `**Subject:** description` highlights.
///
/// With `target_week` set, lines whose week references fall outside the
/// window around it are dropped. Without one, every relevant line is kept.
pub fn extract_highlights(
    text: &str,
    target_week: Option<u32>,
    rules: &ExtractionRules,
) -> Vec<String> {
    let mut highlights = Vec::new();

    for seg in segment(text, rules) {
        // The first line holds the header itself.
        let lines: Vec<&str> = seg.lines().skip(1).collect();
        let joins_context = rules.is_context_subject(seg.subject);
        let mut i = 0;

        while i < lines.len() {
            let line = clean_line(lines[i]);
            i += 1;

            if !classify(line, seg.subject, rules).is_relevant() {
                continue;
            }
            if let Some(target) = target_week {
                let decision = decide(line, target, rules);
                if !decision.keep() {
                    debug!(subject = seg.subject, line, ?decision, "outside week window");
                    continue;
                }
            }

            if joins_context && is_week_range_marker(line) {
                let joined = join_context(line, &lines[i..], rules);
                i += joined.consumed;
                highlights.push(format!("**{}:** {}", seg.subject, joined.text));
            } else {
                highlights.push(format!("**{}:** {line}", seg.subject));
            }
        }
    }

    dedup(highlights)
}

/// Parse fetched page text into a [`SchoolInfo`].
///
/// The window target is `target_week`, or the week the page announces
/// itself when none is given.
pub fn parse_page_text(
    source: PageSource<'_>,
    text: &str,
    target_week: Option<u32>,
    rules: &ExtractionRules,
) -> SchoolInfo {
    let extracted_week = extract_page_week(text);
    let highlights = extract_highlights(text, target_week.or(extracted_week), rules);
    debug!(
        person = source.person_name,
        ?extracted_week,
        count = highlights.len(),
        "extracted highlights"
    );
    SchoolInfo {
        person_name: source.person_name.to_owned(),
        class_label: source.class_label.map(str::to_owned),
        source_url: source.url.to_owned(),
        extracted_week,
        highlights,
        error: None,
    }
}

/// Parse a fetch result, capturing a failure as [`SchoolInfo::error`].
///
/// A failed person never aborts the others; the caller just collects.
pub fn school_info_from_fetch<E: Display>(
    source: PageSource<'_>,
    fetched: Result<String, E>,
    target_week: Option<u32>,
    rules: &ExtractionRules,
) -> SchoolInfo {
    match fetched {
        Ok(text) => parse_page_text(source, &text, target_week, rules),
        Err(e) => {
            warn!(person = source.person_name, url = source.url, error = %e, "school page unavailable");
            SchoolInfo::failed(
                source.person_name,
                source.class_label.map(str::to_owned),
                source.url,
                e.to_string(),
            )
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: PageSource<'static> = PageSource {
        person_name: "Olle",
        class_label: Some("8B"),
        url: "https://skola.example/8b",
    };

    fn extract(text: &str, week: Option<u32>) -> Vec<String> {
        extract_highlights(text, week, &ExtractionRules::default())
    }

    #[test]
    fn english_range_joins_context() {
        let text = "Engelska\nWeek 3 - 8\nRead chapters 4 and 5 for the quiz.\nMatematik\nProv på bråk fredag";
        let highlights = extract(text, Some(5));
        assert_eq!(
            highlights,
            [
                "**Engelska:** Week 3 - 8 – Read chapters 4 and 5 for the quiz.",
                "**Matematik:** Prov på bråk fredag",
            ]
        );
    }

    #[test]
    fn window_for_target_eight() {
        let text = "NO\nInlämning projekt 7-11\nLäxa v.4 kapitel 2\nProv nästa vecka\nFörhör v.8";
        let highlights = extract(text, Some(8));
        assert_eq!(
            highlights,
            [
                "**NO:** Inlämning projekt 7-11",
                "**NO:** Prov nästa vecka",
                "**NO:** Förhör v.8",
            ]
        );
    }

    #[test]
    fn no_target_keeps_everything_relevant() {
        let text = "Svenska\nLäxa v.2\nLäxa v.40";
        assert_eq!(extract(text, None).len(), 2);
    }

    #[test]
    fn sentence_starting_with_no_stays_in_english_context() {
        let text = "Engelska\nWeek 3 - 8\nNo class on Monday, read chapter 4.\nMatematik\nx";
        assert_eq!(
            extract(text, Some(5)),
            ["**Engelska:** Week 3 - 8 – No class on Monday, read chapter 4."]
        );
    }

    #[test]
    fn header_line_skipped_and_boilerplate_dropped() {
        let text = "Matematik: prov\nProv!\nVälkommen till matten, här är läxan\nDiagnos tisdag";
        assert_eq!(extract(text, Some(6)), ["**Matematik:** Diagnos tisdag"]);
    }

    #[test]
    fn equipment_reminders() {
        let text = "Idrott och hälsa\nVi är ute, ta med idrottskläder\nMusik\nVi sjunger";
        assert_eq!(
            extract(text, Some(6)),
            ["**Idrott och hälsa:** Vi är ute, ta med idrottskläder"]
        );
    }

    #[test]
    fn duplicates_across_whitespace_removed() {
        let text = "SO\nLäxa  kapitel 3\nLäxa kapitel 3";
        assert_eq!(extract(text, None), ["**SO:** Läxa  kapitel 3"]);
    }

    #[test]
    fn range_marker_outside_context_subject_not_joined() {
        let text = "Svenska\nv. 5-6\nLäs boken";
        assert_eq!(extract(text, Some(5)), ["**Svenska:** v. 5-6"]);
    }

    #[test]
    fn parse_page_text_uses_page_week() {
        let text = "Vecka 6\nSvenska\nLäxa v.6\nLäxa v.12";
        let info = parse_page_text(SOURCE, text, None, &ExtractionRules::default());
        assert_eq!(info.extracted_week, Some(6));
        assert_eq!(info.highlights, ["**Svenska:** Läxa v.6"]);
        assert_eq!(info.heading(), "Olle (8B)");
        assert!(info.error.is_none());
    }

    #[test]
    fn fetch_error_captured() {
        let info = school_info_from_fetch(
            SOURCE,
            Err::<String, _>("HTTP 503"),
            Some(6),
            &ExtractionRules::default(),
        );
        assert_eq!(info.error.as_deref(), Some("HTTP 503"));
        assert!(info.highlights.is_empty());
        assert_eq!(info.source_url, "https://skola.example/8b");
    }
}

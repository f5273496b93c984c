//! Split page text into subject segments.

use crate::rules::ExtractionRules;

/// Page text belonging to one subject header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Header label as configured.
    pub subject: &'a str,
    /// Text from the header's first occurrence up to the next found header.
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    /// Lines of the segment, the header line included.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.text.lines()
    }
}

/// Locate each header's first occurrence and cut the text between them.
///
/// Headers not found are dropped. Segments come back in page order; two
/// headers found at the same offset keep their configured order.
pub fn segment<'a>(text: &'a str, rules: &'a ExtractionRules) -> Vec<Segment<'a>> {
    let mut found: Vec<(usize, &'a str)> = rules
        .headers()
        .iter()
        .filter_map(|h| h.find_in(text).map(|pos| (pos, h.name.as_str())))
        .collect();
    // Stable sort keeps configured order for equal offsets.
    found.sort_by_key(|(pos, _)| *pos);

    found
        .iter()
        .enumerate()
        .map(|(i, &(start, subject))| {
            let end = found.get(i + 1).map_or(text.len(), |(next, _)| *next);
            Segment {
                subject,
                text: &text[start..end],
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

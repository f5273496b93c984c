//! Per-line relevance rules.
//!
//! A line is checked by an ordered chain; the first rule that decides wins.
//! See [`classify`].

use veckobrev_core::text::char_len;

use crate::rules::{ExtractionRules, WEEK_REF};

/// Why a line was accepted or rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relevance {
    /// Empty after cleaning.
    Empty,
    /// Longer than the configured maximum.
    TooLong,
    /// Boilerplate without a week reference.
    Boilerplate,
    /// Contains an important keyword.
    Keyword,
    /// Contains a week reference.
    WeekReference,
    /// Equipment reminder in an equipment subject.
    Equipment,
    /// Nothing digest-worthy.
    Irrelevant,
}

impl Relevance {
    /// Whether the line should become a highlight candidate.
    pub fn is_relevant(self) -> bool {
        matches!(self, Self::Keyword | Self::WeekReference | Self::Equipment)
    }
}

/// Trim and strip leading colons left over from `Header:` layouts.
pub fn clean_line(line: &str) -> &str {
    line.trim().trim_start_matches(':').trim_start()
}

/// Whether `line` mentions a week (`v.6`, `vecka 6`, `week 6`).
pub fn has_week_reference(line: &str) -> bool {
    WEEK_REF.is_match(line)
}

/// Classify an already cleaned line belonging to `subject`.
pub fn classify(line: &str, subject: &str, rules: &ExtractionRules) -> Relevance {
    if line.is_empty() {
        return Relevance::Empty;
    }
    if char_len(line) > rules.max_line_chars {
        return Relevance::TooLong;
    }
    let week_ref = has_week_reference(line);
    if !week_ref && rules.boilerplate.iter().any(|re| re.is_match(line)) {
        return Relevance::Boilerplate;
    }
    if rules.important.as_ref().is_some_and(|re| re.is_match(line)) {
        return Relevance::Keyword;
    }
    if week_ref {
        return Relevance::WeekReference;
    }
    if rules.is_equipment_subject(subject) {
        let lower = line.to_lowercase();
        if rules.equipment_terms.iter().any(|t| lower.contains(t.as_str())) {
            return Relevance::Equipment;
        }
    }
    Relevance::Irrelevant
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

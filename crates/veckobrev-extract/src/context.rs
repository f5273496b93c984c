//! Context joining for bare week-range lines.
//!
//! Some subjects publish a plan as a range line (`Week 3 - 8`) followed by
//! the actual assignments on their own lines. For those subjects the
//! following lines are folded into the range line's highlight.

use veckobrev_core::text::truncate_with_suffix;

use crate::relevance::clean_line;
use crate::rules::{ExtractionRules, WEEK_RANGE_MARKER};

/// Whether `line` is only a week-range marker such as `v. 7–11:`.
pub fn is_week_range_marker(line: &str) -> bool {
    WEEK_RANGE_MARKER.is_match(line.trim())
}

/// A marker line with its gathered context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Joined {
    /// `marker – ctx1 ctx2`, or just the marker when nothing followed.
    pub text: String,
    /// Lines of `following` used up, blank lines in between included.
    pub consumed: usize,
}

/// Gather context for `marker` from `following`.
///
/// Stops at a subject header, a promo marker, or after the configured
/// number of non-blank lines. Each context line is truncated with `…`.
pub fn join_context(marker: &str, following: &[&str], rules: &ExtractionRules) -> Joined {
    let marker = marker.trim().trim_end_matches(':').trim_end();
    let mut parts = Vec::new();
    let mut consumed = 0;

    for raw in following {
        if parts.len() >= rules.max_context_lines {
            break;
        }
        let line = clean_line(raw);
        if !line.is_empty() && (rules.is_subject_header(line) || rules.is_promo_marker(line)) {
            break;
        }
        consumed += 1;
        if !line.is_empty() {
            parts.push(truncate_with_suffix(line, rules.max_context_chars, "…"));
        }
    }

    // Trailing blanks belong to whatever comes next.
    while consumed > 0 && following[consumed - 1].trim().is_empty() {
        consumed -= 1;
    }

    let text = if parts.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} – {}", parts.join(" "))
    };
    Joined { text, consumed }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

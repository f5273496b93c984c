//! Week-window matching.
//!
//! A line survives when its week references fall within one week of the
//! target. Lines without any week number are always kept: a missing or
//! ambiguous reference defaults to inclusion.

use crate::rules::{ExtractionRules, WEEK_RANGE, WEEK_REF};

const MAX_ISO_WEEK: u32 = 53;

/// Week numbers mentioned by a line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeekRefs {
    /// Single references such as `v.6`.
    pub singles: Vec<u32>,
    /// Inclusive ranges such as `7-11`, low end first.
    pub ranges: Vec<(u32, u32)>,
}

impl WeekRefs {
    /// Every number mentioned, range endpoints included.
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.singles
            .iter()
            .copied()
            .chain(self.ranges.iter().flat_map(|&(lo, hi)| [lo, hi]))
    }

    /// No week number at all.
    pub fn is_empty(&self) -> bool {
        self.singles.is_empty() && self.ranges.is_empty()
    }
}

/// Collect single and range week references from `line`.
///
/// Numbers outside `1..=53` and ranges whose ends are reversed are not week
/// references and are ignored.
pub fn week_refs(line: &str) -> WeekRefs {
    let singles = WEEK_REF
        .captures_iter(line)
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .filter(|w| is_week_number(*w))
        .collect();
    let ranges = WEEK_RANGE
        .captures_iter(line)
        .filter_map(|c| {
            let lo: u32 = c.get(1)?.as_str().parse().ok()?;
            let hi: u32 = c.get(2)?.as_str().parse().ok()?;
            (is_week_number(lo) && is_week_number(hi) && lo <= hi).then_some((lo, hi))
        })
        .collect();
    WeekRefs { singles, ranges }
}

fn is_week_number(week: u32) -> bool {
    (1..=MAX_ISO_WEEK).contains(&week)
}

/// Outcome of the window check, named after the rule that decided it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowDecision {
    /// "this week" / "next week" phrase.
    RelativePhrase,
    /// No week number to compare.
    NoWeekNumbers,
    /// A number or range touches the window.
    InWindow,
    /// Every number lies before the window.
    AllBefore,
    /// Numbers outside the window on both sides, or only after it.
    OutOfWindow,
}

impl WindowDecision {
    /// Whether the line is kept.
    pub fn keep(self) -> bool {
        matches!(
            self,
            Self::RelativePhrase | Self::NoWeekNumbers | Self::InWindow
        )
    }
}

/// Decide whether `line` belongs to `target_week`.
///
/// The window is `target - 1 ..= target + 1`, computed arithmetically: week 1
/// accepts weeks 1 and 2, and nothing wraps into the previous year.
pub fn decide(line: &str, target_week: u32, rules: &ExtractionRules) -> WindowDecision {
    let lower = line.to_lowercase();
    if rules
        .relative_week_phrases
        .iter()
        .any(|p| !p.is_empty() && lower.contains(p.as_str()))
    {
        return WindowDecision::RelativePhrase;
    }

    let refs = week_refs(line);
    if refs.is_empty() {
        return WindowDecision::NoWeekNumbers;
    }

    let lo = target_week.saturating_sub(1);
    let hi = target_week + 1;
    let single_hit = refs.singles.iter().any(|w| (lo..=hi).contains(w));
    let range_hit = refs.ranges.iter().any(|&(a, b)| a <= hi && b >= lo);
    if single_hit || range_hit {
        return WindowDecision::InWindow;
    }

    if refs.numbers().all(|w| w < target_week) {
        return WindowDecision::AllBefore;
    }
    WindowDecision::OutOfWindow
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! ISO week arithmetic.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};

/// A validated ISO (year, week) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsoWeek {
    year: i32,
    week: u32,
}

impl IsoWeek {
    /// Validate a (year, week) pair. Week 53 only exists in long years.
    pub fn new(year: i32, week: u32) -> Result<Self> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .map(|_| Self { year, week })
            .ok_or(CoreError::InvalidWeek { year, week })
    }

    /// The ISO week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// The week a digest produced on `today` is about: the ISO week of
    /// `today + 7 days`.
    pub fn following(today: NaiveDate) -> Self {
        let next = today.checked_add_days(Days::new(7)).unwrap_or(today);
        Self::containing(next)
    }

    /// ISO year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// ISO week number (1..=53).
    pub fn week(self) -> u32 {
        self.week
    }

    /// Monday of this week.
    pub fn monday(self) -> NaiveDate {
        // Validated in the constructor.
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon).unwrap_or_default()
    }

    /// Monday through Sunday.
    pub fn days(self) -> [NaiveDate; 7] {
        let monday = self.monday();
        std::array::from_fn(|i| {
            monday
                .checked_add_days(Days::new(i as u64))
                .unwrap_or(monday)
        })
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_week_zero() {
        assert_matches!(IsoWeek::new(2025, 0), Err(CoreError::InvalidWeek { week: 0, .. }));
    }

    #[test]
    fn week_53_only_in_long_years() {
        assert!(IsoWeek::new(2026, 53).is_ok());
        assert!(IsoWeek::new(2025, 53).is_err());
    }

    #[test]
    fn following_from_sunday() {
        // Sunday 2025-02-02 is in week 5; a week later is week 6
        let w = IsoWeek::following(date(2025, 2, 2));
        assert_eq!((w.year(), w.week()), (2025, 6));
    }

    #[test]
    fn following_crosses_year_boundary() {
        // 2024-12-29 + 7 = 2025-01-05, which is ISO 2025-W01
        let w = IsoWeek::following(date(2024, 12, 29));
        assert_eq!((w.year(), w.week()), (2025, 1));
    }

    #[test]
    fn days_run_monday_to_sunday() {
        let days = IsoWeek::new(2025, 7).unwrap().days();
        assert_eq!(days[0], date(2025, 2, 10));
        assert_eq!(days[6], date(2025, 2, 16));
        assert_eq!(days[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(IsoWeek::new(2025, 7).unwrap().to_string(), "2025-W07");
    }
}

//! # veckobrev-digest
//!
//! Template rendering of the weekly digest: title, family line, school
//! highlights per person, and the calendar laid out day by day for the
//! target week.
//!
//! ## Crate Position
//!
//! Depends on: veckobrev-core, veckobrev-settings.
//! Depended on by: veckobrev (CLI).

#![deny(unsafe_code)]

pub mod options;
pub mod render;

use chrono::NaiveDate;
use veckobrev_core::IsoWeek;

pub use options::{DigestOptions, parse_timezone};
pub use render::render_digest;
pub use veckobrev_core::calendar::group_calendars;

/// Week a digest run on `today` is about: the ISO week after today's.
pub fn next_target_week(today: NaiveDate) -> IsoWeek {
    IsoWeek::following(today)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use veckobrev_core::SchoolInfo;
    use veckobrev_settings::VeckobrevSettings;
    use veckobrev_snapshot::{SectionLabels, parse_school_section};

    use super::*;

    #[test]
    fn target_week_crosses_year() {
        let sunday = NaiveDate::from_ymd_opt(2024, 12, 29).unwrap();
        let week = next_target_week(sunday);
        assert_eq!((week.year(), week.week()), (2025, 1));
    }

    #[test]
    fn target_week_midweek() {
        let thursday = NaiveDate::from_ymd_opt(2025, 2, 6).unwrap();
        assert_eq!(next_target_week(thursday).week(), 7);
    }

    #[test]
    fn rendered_school_section_parses_back() {
        let settings = VeckobrevSettings::default();
        let options = DigestOptions::from_settings(&settings, Some(IsoWeek::new(2025, 7).unwrap()));
        let infos = [
            SchoolInfo {
                person_name: "Olle".into(),
                class_label: Some("8B".into()),
                source_url: String::new(),
                extracted_week: Some(7),
                highlights: vec![
                    "**Svenska:** Läxa v.7".into(),
                    "**NO:** Förhör fredag".into(),
                ],
                error: None,
            },
            SchoolInfo {
                person_name: "Stina".into(),
                class_label: None,
                source_url: String::new(),
                extracted_week: Some(7),
                highlights: Vec::new(),
                error: None,
            },
            SchoolInfo::failed("Kim", None, "https://x", "timeout"),
        ];
        let digest = render_digest(&infos, &[], &options);

        let names = ["Olle".to_string(), "Stina".to_string(), "Kim".to_string()];
        let parsed = parse_school_section(&digest, &names, SectionLabels::default());
        assert_eq!(parsed["Olle"], ["**Svenska:** Läxa v.7", "**NO:** Förhör fredag"]);
        assert!(parsed["Stina"].is_empty());
        assert!(parsed["Kim"].is_empty());
    }
}

//! Words used in rendered digests and notifications.
//!
//! The digest's section headings double as parse anchors: the snapshot
//! builder reads the school section back out of a rendered digest using
//! `school_section` and `calendar_section`.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Output vocabulary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelSettings {
    /// "Vecka", capitalized; lowercased where a sentence needs it.
    pub week: String,
    /// Suffix of the notification header.
    pub updates: String,
    /// School section heading (without `##`).
    pub school_section: String,
    /// Calendar section heading (without `##`).
    pub calendar_section: String,
    /// Shown for a changed person whose new lines cannot be resolved.
    pub page_changed: String,
    /// Truncation note; `{n}` is replaced with the hidden count.
    pub more_events: String,
    /// Digest title suffix.
    pub digest_title: String,
    /// Title used when no week is known.
    pub upcoming_week: String,
    /// Label of the family-together line.
    pub together: String,
    /// Sentence start of the family-together line.
    pub together_intro: String,
    /// Family-together text when no event has a summary.
    pub together_fallback: String,
    /// Person with no highlights.
    pub no_highlights: String,
    /// Prefix for a school page fetch failure.
    pub fetch_failed: String,
    /// Hint appended after any failed school page.
    pub check_pages: String,
    /// Prefix for a calendar fetch failure.
    pub calendar_failed: String,
    /// Day without events.
    pub no_events_day: String,
    /// Week without events.
    pub no_events_week: String,
    /// Time label for events starting at midnight.
    pub all_day: String,
    /// Full weekday names, Monday first.
    pub weekdays: Vec<String>,
    /// Abbreviated weekday names, Monday first.
    pub short_weekdays: Vec<String>,
    /// Month names, January first.
    pub months: Vec<String>,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            week: "Vecka".into(),
            updates: "uppdateringar".into(),
            school_section: "Skola".into(),
            calendar_section: "Kalender".into(),
            page_changed: "(sida ändrad)".into(),
            more_events: "... och {n} till.".into(),
            digest_title: "Veckosammanfattning".into(),
            upcoming_week: "Kommande vecka".into(),
            together: "Tillsammans".into(),
            together_intro: "Denna vecka har familjen tillsammans".into(),
            together_fallback: "Denna vecka har familjen aktiviteter tillsammans – se kalendern."
                .into(),
            no_highlights: "Inga prov/läxor/förhör hittade denna vecka.".into(),
            fetch_failed: "Kunde inte hämta sidan".into(),
            check_pages: "*(Kontrollera att skolsidorna är tillgängliga.)*".into(),
            calendar_failed: "Kunde inte hämta kalender".into(),
            no_events_day: "Inga händelser.".into(),
            no_events_week: "Inga händelser denna vecka.".into(),
            all_day: "Heldag".into(),
            weekdays: owned(&[
                "Måndag", "Tisdag", "Onsdag", "Torsdag", "Fredag", "Lördag", "Söndag",
            ]),
            short_weekdays: owned(&["Mån", "Tis", "Ons", "Tor", "Fre", "Lör", "Sön"]),
            months: owned(&[
                "januari",
                "februari",
                "mars",
                "april",
                "maj",
                "juni",
                "juli",
                "augusti",
                "september",
                "oktober",
                "november",
                "december",
            ]),
        }
    }
}

impl LabelSettings {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.weekdays.len() != 7 || self.short_weekdays.len() != 7 {
            return Err(SettingsError::InvalidValue(
                "labels.weekdays and labels.shortWeekdays need 7 entries".into(),
            ));
        }
        if self.months.len() != 12 {
            return Err(SettingsError::InvalidValue(
                "labels.months needs 12 entries".into(),
            ));
        }
        if self.school_section.trim().is_empty() || self.calendar_section.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "labels.schoolSection and labels.calendarSection must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Truncation note for `hidden` events.
    pub fn more_events_note(&self, hidden: usize) -> String {
        self.more_events.replace("{n}", &hidden.to_string())
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_events_note_substitutes_count() {
        assert_eq!(LabelSettings::default().more_events_note(3), "... och 3 till.");
    }

    #[test]
    fn short_weekday_list_rejected() {
        let labels = LabelSettings {
            weekdays: owned(&["Mon"]),
            ..Default::default()
        };
        assert!(labels.validate().is_err());
    }

    #[test]
    fn english_override_parses() {
        let labels: LabelSettings = serde_json::from_str(
            r#"{"schoolSection": "School", "calendarSection": "Calendar", "week": "Week"}"#,
        )
        .unwrap();
        assert_eq!(labels.school_section, "School");
        assert_eq!(labels.months.len(), 12);
        labels.validate().unwrap();
    }
}

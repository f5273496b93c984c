//! Rendering options.

use chrono_tz::Tz;
use tracing::warn;
use veckobrev_core::IsoWeek;
use veckobrev_settings::{LabelSettings, VeckobrevSettings};

/// Inputs to [`render_digest`](crate::render_digest) besides the data.
#[derive(Clone, Debug)]
pub struct DigestOptions<'a> {
    /// Week the digest is about. Without one the calendar is a flat list.
    pub week: Option<IsoWeek>,
    /// Calendar fetch failure, shown instead of the calendar.
    pub calendar_error: Option<&'a str>,
    /// Zone events are shown in; `None` keeps each event's own offset.
    pub timezone: Option<Tz>,
    /// Output words.
    pub labels: &'a LabelSettings,
    /// Heading for events with no person.
    pub other_label: &'a str,
    /// Calendar group whose events are shared by the whole family.
    pub family_calendar: &'a str,
}

impl<'a> DigestOptions<'a> {
    /// Options from loaded settings. The timezone falls back to event
    /// offsets when the configured name is unknown.
    pub fn from_settings(settings: &'a VeckobrevSettings, week: Option<IsoWeek>) -> Self {
        Self {
            week,
            calendar_error: None,
            timezone: parse_timezone(&settings.calendar.timezone),
            labels: &settings.labels,
            other_label: &settings.calendar.other_label,
            family_calendar: &settings.calendar.family_calendar,
        }
    }

    /// Show `error` in place of the calendar.
    #[must_use]
    pub fn calendar_error(mut self, error: Option<&'a str>) -> Self {
        self.calendar_error = error;
        self
    }
}

/// Look up an IANA zone name such as `Europe/Stockholm`.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(e) => {
            warn!(timezone = name, error = %e, "unknown timezone, using event offsets");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_zone() {
        assert_eq!(parse_timezone("Europe/Stockholm"), Some(chrono_tz::Europe::Stockholm));
    }

    #[test]
    fn unknown_or_empty_zone() {
        assert_eq!(parse_timezone("Mars/Olympus"), None);
        assert_eq!(parse_timezone("  "), None);
    }

    #[test]
    fn from_default_settings() {
        let settings = VeckobrevSettings::default();
        let options = DigestOptions::from_settings(&settings, None).calendar_error(Some("401"));
        assert_eq!(options.timezone, Some(chrono_tz::Europe::Stockholm));
        assert_eq!(options.family_calendar, "Familjen");
        assert_eq!(options.calendar_error, Some("401"));
    }
}

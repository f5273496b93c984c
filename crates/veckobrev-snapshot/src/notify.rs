//! Short update message for a [`DiffResult`].

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use veckobrev_core::IsoWeek;
use veckobrev_core::text::truncate_chars;
use veckobrev_settings::LabelSettings;

use crate::diff::DiffResult;
use crate::model::EventRecord;

/// New events listed before the rest are summarized as a count.
pub const MAX_NOTIFY_EVENTS: usize = 15;

/// Render the update message.
///
/// Changed persons get their new lines from `updates`, or the "page
/// changed" marker when none were resolved. New events are grouped by
/// person in first-seen order.
pub fn format_notification(
    week: IsoWeek,
    result: &DiffResult,
    updates: &BTreeMap<String, Vec<String>>,
    labels: &LabelSettings,
) -> String {
    let mut parts = vec![
        format!(
            "**{} {} ({}) – {}**",
            labels.week,
            week.week(),
            week.year(),
            labels.updates
        ),
        String::new(),
    ];

    if !result.school_changed.is_empty() {
        parts.push(format!("## {}", labels.school_section));
        parts.push(String::new());
        for person in &result.school_changed {
            match updates.get(person).filter(|l| !l.is_empty()) {
                Some(lines) => {
                    parts.push(format!("**{person}:**"));
                    parts.extend(lines.iter().cloned());
                }
                None => parts.push(format!("**{person}:** {}", labels.page_changed)),
            }
            parts.push(String::new());
        }
    }

    if !result.new_events.is_empty() {
        parts.push(format!("## {}", labels.calendar_section));
        parts.push(String::new());

        let shown = &result.new_events[..result.new_events.len().min(MAX_NOTIFY_EVENTS)];
        let mut groups: Vec<(&str, Vec<&EventRecord>)> = Vec::new();
        for event in shown {
            match groups.iter_mut().find(|(p, _)| *p == event.person) {
                Some((_, events)) => events.push(event),
                None => groups.push((event.person.as_str(), vec![event])),
            }
        }
        for (person, events) in groups {
            parts.push(format!("**{person}:**"));
            for event in events {
                parts.push(format!(
                    "• {} – {}",
                    event_time(&event.start, labels),
                    event.summary
                ));
            }
            parts.push(String::new());
        }

        let hidden = result.new_events.len().saturating_sub(MAX_NOTIFY_EVENTS);
        if hidden > 0 {
            parts.push(labels.more_events_note(hidden));
        }
    }

    parts.join("\n").trim_end().to_string()
}

/// `Mån 10/02 08:00` in the instant's own offset, or the first 16
/// characters of `start` when it does not parse.
fn event_time(start: &str, labels: &LabelSettings) -> String {
    let parsed = DateTime::parse_from_rfc3339(start)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M"));
    match parsed {
        Ok(dt) => {
            let day = labels
                .short_weekdays
                .get(dt.weekday().num_days_from_monday() as usize)
                .map_or("", String::as_str);
            format!(
                "{day} {:02}/{:02} {:02}:{:02}",
                dt.day(),
                dt.month(),
                dt.hour(),
                dt.minute()
            )
        }
        Err(_) => truncate_chars(start, 16).to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn record(person: &str, start: &str, summary: &str) -> EventRecord {
        EventRecord {
            person: person.into(),
            summary: summary.into(),
            start: start.into(),
            end: None,
            location: None,
        }
    }

    fn week() -> IsoWeek {
        IsoWeek::new(2025, 7).unwrap()
    }

    #[test]
    fn school_and_calendar_sections() {
        let result = DiffResult {
            school_changed: BTreeSet::from(["Bob".to_string(), "Olle".to_string()]),
            new_events: vec![record("Alice", "2025-02-11T09:00:00+01:00", "Recital")],
        };
        let updates = BTreeMap::from([("Bob".to_string(), vec!["**English:** Essay due".to_string()])]);
        let text = format_notification(week(), &result, &updates, &LabelSettings::default());
        assert_eq!(
            text,
            "**Vecka 7 (2025) – uppdateringar**\n\
             \n\
             ## Skola\n\
             \n\
             **Bob:**\n\
             **English:** Essay due\n\
             \n\
             **Olle:** (sida ändrad)\n\
             \n\
             ## Kalender\n\
             \n\
             **Alice:**\n\
             • Tis 11/02 09:00 – Recital"
        );
    }

    #[test]
    fn time_uses_event_offset() {
        let labels = LabelSettings::default();
        assert_eq!(event_time("2025-02-10T23:30:00-05:00", &labels), "Mån 10/02 23:30");
        assert_eq!(event_time("2025-02-10T08:00", &labels), "Mån 10/02 08:00");
    }

    #[test]
    fn unparseable_start_truncated() {
        let labels = LabelSettings::default();
        assert_eq!(event_time("sometime next week maybe", &labels), "sometime next we");
        assert_eq!(event_time("soon", &labels), "soon");
    }

    #[test]
    fn groups_in_first_seen_order() {
        let result = DiffResult {
            school_changed: BTreeSet::new(),
            new_events: vec![
                record("Stina", "2025-02-10T17:00:00+01:00", "Dans"),
                record("Olle", "2025-02-11T17:00:00+01:00", "Fotboll"),
                record("Stina", "2025-02-12T17:00:00+01:00", "Simning"),
            ],
        };
        let text = format_notification(week(), &result, &BTreeMap::new(), &LabelSettings::default());
        let stina = text.find("**Stina:**").unwrap();
        let olle = text.find("**Olle:**").unwrap();
        let simning = text.find("Simning").unwrap();
        assert!(stina < simning && simning < olle);
        assert!(!text.contains("## Skola"));
    }

    #[test]
    fn more_than_fifteen_events_truncated() {
        let new_events = (0..18)
            .map(|i| record("Alice", "2025-02-10T08:00:00+01:00", &format!("E{i}")))
            .collect();
        let result = DiffResult {
            school_changed: BTreeSet::new(),
            new_events,
        };
        let text = format_notification(week(), &result, &BTreeMap::new(), &LabelSettings::default());
        assert_eq!(text.matches('•').count(), 15);
        assert!(text.ends_with("... och 3 till."));
        assert!(!text.contains("E15"));
    }
}

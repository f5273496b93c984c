//! Calendar events, grouped per person.
//!
//! Events arrive already parsed (ICS parsing and recurrence expansion happen
//! upstream). This module only shapes them into the per-person ordering the
//! rest of the pipeline expects.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A single calendar event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title.
    #[serde(default)]
    pub summary: String,
    /// Start instant, timezone-aware.
    pub start: DateTime<FixedOffset>,
    /// End instant, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<FixedOffset>>,
    /// Free-text location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Events for one person, sorted by start.
///
/// An empty `person` is the unassigned/global calendar group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEvents {
    /// Person name, or empty for the global group.
    #[serde(default)]
    pub person: String,
    /// Events ordered by start instant.
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl PersonEvents {
    /// Build a group, sorting the events by start.
    pub fn new(person: impl Into<String>, mut events: Vec<CalendarEvent>) -> Self {
        events.sort_by_key(|e| e.start);
        Self {
            person: person.into(),
            events,
        }
    }
}

/// Ordered mapping from person to their events.
pub type EventsByPerson = Vec<PersonEvents>;

/// Distribute shared calendars over the persons they belong to.
///
/// Each assignment is `(names, events)`: one fetched calendar shown for every
/// listed name. The result has one group per name, names sorted, each group's
/// events sorted by start. A calendar listed for no one is dropped.
pub fn group_calendars(assignments: Vec<(Vec<String>, Vec<CalendarEvent>)>) -> EventsByPerson {
    let mut by_person: BTreeMap<String, Vec<CalendarEvent>> = BTreeMap::new();
    for (names, events) in assignments {
        for name in names {
            by_person.entry(name).or_default().extend(events.iter().cloned());
        }
    }
    by_person
        .into_iter()
        .map(|(person, events)| PersonEvents::new(person, events))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn event(summary: &str, start: &str) -> CalendarEvent {
        CalendarEvent {
            summary: summary.into(),
            start: DateTime::parse_from_rfc3339(start).unwrap(),
            end: None,
            location: None,
        }
    }

    #[test]
    fn new_sorts_by_start() {
        let group = PersonEvents::new(
            "Alice",
            vec![
                event("B", "2025-02-11T09:00:00+01:00"),
                event("A", "2025-02-10T08:00:00+01:00"),
            ],
        );
        let summaries: Vec<_> = group.events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, ["A", "B"]);
    }

    #[test]
    fn sort_compares_instants_across_offsets() {
        // 08:30+01:00 is 07:30Z, earlier than 08:00Z
        let group = PersonEvents::new(
            "Alice",
            vec![
                event("utc", "2025-02-10T08:00:00+00:00"),
                event("cet", "2025-02-10T08:30:00+01:00"),
            ],
        );
        assert_eq!(group.events[0].summary, "cet");
    }

    #[test]
    fn shared_calendar_fans_out() {
        let family = vec![event("Middag", "2025-02-12T18:00:00+01:00")];
        let olle = vec![event("Fotboll", "2025-02-10T17:00:00+01:00")];
        let grouped = group_calendars(vec![
            (vec!["Stina".into(), "Olle".into()], family),
            (vec!["Olle".into()], olle),
        ]);

        let names: Vec<_> = grouped.iter().map(|g| g.person.as_str()).collect();
        assert_eq!(names, ["Olle", "Stina"]);
        let olle_events: Vec<_> = grouped[0].events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(olle_events, ["Fotboll", "Middag"]);
        assert_eq!(grouped[1].events.len(), 1);
    }

    #[test]
    fn unassigned_calendar_dropped() {
        let grouped = group_calendars(vec![(vec![], vec![event("X", "2025-02-10T08:00:00Z")])]);
        assert!(grouped.is_empty());
    }

    #[test]
    fn deserializes_rfc3339() {
        let e: CalendarEvent = serde_json::from_str(
            r#"{"summary":"Tandläkare","start":"2025-02-10T08:00:00+01:00","location":"Centrum"}"#,
        )
        .unwrap();
        assert_eq!(e.start.offset().local_minus_utc(), 3600);
        assert_eq!(e.location.as_deref(), Some("Centrum"));
        assert!(e.end.is_none());
    }
}

//! Snapshot data model and its persisted JSON shape.
//!
//! On disk a snapshot carries exactly one of `school_hashes` or
//! `school_highlights`. In memory that choice is the [`SchoolState`] enum,
//! so a snapshot with neither or both cannot be constructed.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use veckobrev_core::{CalendarEvent, IsoWeek};

use crate::errors::SnapshotError;

/// Person name to highlight lines.
pub type HighlightMap = BTreeMap<String, Vec<String>>;

/// How school pages were recorded for a capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchoolMode {
    /// SHA-256 of the raw page text per person.
    Hashes,
    /// Extracted highlight lines per person.
    Highlights,
}

/// School state of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchoolState {
    /// Person to hex SHA-256 of the trimmed raw page text.
    Hashes(BTreeMap<String, String>),
    /// Person to extracted highlight lines.
    Highlights(HighlightMap),
}

impl SchoolState {
    /// Which representation this is.
    pub fn mode(&self) -> SchoolMode {
        match self {
            Self::Hashes(_) => SchoolMode::Hashes,
            Self::Highlights(_) => SchoolMode::Highlights,
        }
    }

    /// Highlight lines, in highlights mode.
    pub fn highlights(&self) -> Option<&HighlightMap> {
        match self {
            Self::Highlights(map) => Some(map),
            Self::Hashes(_) => None,
        }
    }
}

/// One calendar event as recorded in a snapshot.
///
/// Instants are kept as their serialized RFC 3339 strings: the diff keys on
/// the exact text, and a hand-edited file with an odd timestamp still loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Person the event belongs to.
    pub person: String,
    /// Event title.
    #[serde(default)]
    pub summary: String,
    /// Start instant.
    pub start: String,
    /// End instant.
    #[serde(default)]
    pub end: Option<String>,
    /// Location.
    #[serde(default)]
    pub location: Option<String>,
}

impl EventRecord {
    /// Record `event` under `person`.
    pub fn from_event(person: impl Into<String>, event: &CalendarEvent) -> Self {
        Self {
            person: person.into(),
            summary: event.summary.clone(),
            start: event.start.to_rfc3339(),
            end: event.end.map(|e| e.to_rfc3339()),
            location: event.location.clone().filter(|l| !l.is_empty()),
        }
    }

    /// Identity used by the diff: `(person, start, summary)`.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.person, &self.start, &self.summary)
    }
}

/// Point-in-time record of one target week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotFile", into = "SnapshotFile")]
pub struct Snapshot {
    /// Target week; also the storage key.
    pub week: IsoWeek,
    /// When the snapshot was taken.
    pub captured_at: DateTime<FixedOffset>,
    /// Calendar events in capture order.
    pub calendar: Vec<EventRecord>,
    /// School pages, hashed or extracted.
    pub school: SchoolState,
    /// Highlight lines parsed back out of the digest that was sent.
    pub school_digest_highlights: Option<HighlightMap>,
}

/// Persisted layout.
#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    iso_year: i32,
    target_week: u32,
    #[serde(deserialize_with = "captured_at_lenient")]
    captured_at: DateTime<FixedOffset>,
    #[serde(default)]
    calendar: Vec<EventRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    school_hashes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    school_highlights: Option<HighlightMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    school_digest_highlights: Option<HighlightMap>,
}

/// RFC 3339, or an ISO timestamp without offset read as local time.
fn captured_at_lenient<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_captured_at(&text).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid captured_at timestamp: {text}"))
    })
}

fn parse_captured_at(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at);
    }
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    // a wall time skipped by a DST jump has no local mapping
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|at| at.fixed_offset())
}

impl TryFrom<SnapshotFile> for Snapshot {
    type Error = SnapshotError;

    fn try_from(file: SnapshotFile) -> Result<Self, Self::Error> {
        let school = match (file.school_hashes, file.school_highlights) {
            (Some(hashes), None) => SchoolState::Hashes(hashes),
            (None, Some(highlights)) => SchoolState::Highlights(highlights),
            (Some(_), Some(_)) => {
                return Err(SnapshotError::InvalidSchool(
                    "both school_hashes and school_highlights present".into(),
                ));
            }
            (None, None) => {
                return Err(SnapshotError::InvalidSchool(
                    "neither school_hashes nor school_highlights present".into(),
                ));
            }
        };
        Ok(Self {
            week: IsoWeek::new(file.iso_year, file.target_week)?,
            captured_at: file.captured_at,
            calendar: file.calendar,
            school,
            school_digest_highlights: file.school_digest_highlights,
        })
    }
}

impl From<Snapshot> for SnapshotFile {
    fn from(snapshot: Snapshot) -> Self {
        let (school_hashes, school_highlights) = match snapshot.school {
            SchoolState::Hashes(h) => (Some(h), None),
            SchoolState::Highlights(h) => (None, Some(h)),
        };
        Self {
            iso_year: snapshot.week.year(),
            target_week: snapshot.week.week(),
            captured_at: snapshot.captured_at,
            calendar: snapshot.calendar,
            school_hashes,
            school_highlights,
            school_digest_highlights: snapshot.school_digest_highlights,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

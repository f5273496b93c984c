//! Assemble a [`Snapshot`] from one run's school and calendar data.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local};
use sha2::{Digest, Sha256};
use tracing::debug;
use veckobrev_core::{IsoWeek, PersonEvents, RawSchoolBlock, SchoolInfo};

use crate::digest_parse::{SectionLabels, parse_school_section};
use crate::model::{EventRecord, SchoolState, Snapshot};

/// Group label for calendar events with no person.
pub const DEFAULT_OTHER_LABEL: &str = "Övrigt";

/// School input; the variant decides how school pages are recorded.
#[derive(Clone, Copy, Debug)]
pub enum SchoolInput<'a> {
    /// Rule-based extraction: highlights are stored as-is.
    RuleBased(&'a [SchoolInfo]),
    /// Raw extraction: page text is hashed.
    Raw(&'a [RawSchoolBlock]),
}

/// Builder for a [`Snapshot`].
///
/// ```ignore
/// let snapshot = SnapshotBuilder::new(week, SchoolInput::RuleBased(&infos), &events)
///     .digest(&body, &names)
///     .build();
/// ```
#[derive(Debug)]
pub struct SnapshotBuilder<'a> {
    week: IsoWeek,
    school: SchoolInput<'a>,
    events: &'a [PersonEvents],
    other_label: &'a str,
    digest: Option<(&'a str, &'a [String])>,
    sections: SectionLabels<'a>,
    captured_at: Option<DateTime<FixedOffset>>,
}

impl<'a> SnapshotBuilder<'a> {
    /// Start a snapshot for `week`.
    pub fn new(week: IsoWeek, school: SchoolInput<'a>, events: &'a [PersonEvents]) -> Self {
        Self {
            week,
            school,
            events,
            other_label: DEFAULT_OTHER_LABEL,
            digest: None,
            sections: SectionLabels::default(),
            captured_at: None,
        }
    }

    /// Person recorded for events from the unassigned group.
    #[must_use]
    pub fn other_label(mut self, label: &'a str) -> Self {
        self.other_label = label;
        self
    }

    /// Also record the school section of the digest that was sent.
    #[must_use]
    pub fn digest(mut self, body: &'a str, person_names: &'a [String]) -> Self {
        self.digest = Some((body, person_names));
        self
    }

    /// Headings used to find the school section in the digest.
    #[must_use]
    pub fn sections(mut self, sections: SectionLabels<'a>) -> Self {
        self.sections = sections;
        self
    }

    /// Pin the capture time instead of using the local clock.
    #[must_use]
    pub fn captured_at(mut self, at: DateTime<FixedOffset>) -> Self {
        self.captured_at = Some(at);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> Snapshot {
        let school = match self.school {
            SchoolInput::RuleBased(infos) => SchoolState::Highlights(
                infos
                    .iter()
                    .map(|info| (info.person_name.clone(), info.highlights.clone()))
                    .collect(),
            ),
            SchoolInput::Raw(blocks) => SchoolState::Hashes(
                blocks
                    .iter()
                    .map(|b| {
                        let text = b.raw_text.as_deref().unwrap_or_default();
                        (b.person_name.clone(), content_hash(text))
                    })
                    .collect::<BTreeMap<_, _>>(),
            ),
        };

        let calendar: Vec<EventRecord> = self
            .events
            .iter()
            .flat_map(|group| {
                let person = if group.person.is_empty() {
                    self.other_label
                } else {
                    group.person.as_str()
                };
                group
                    .events
                    .iter()
                    .map(move |e| EventRecord::from_event(person, e))
            })
            .collect();

        let school_digest_highlights = self
            .digest
            .filter(|(body, _)| !body.is_empty())
            .map(|(body, names)| parse_school_section(body, names, self.sections));

        debug!(
            week = %self.week,
            mode = ?school.mode(),
            events = calendar.len(),
            from_digest = school_digest_highlights.is_some(),
            "built snapshot"
        );

        Snapshot {
            week: self.week,
            captured_at: self
                .captured_at
                .unwrap_or_else(|| Local::now().fixed_offset()),
            calendar,
            school,
            school_digest_highlights,
        }
    }
}

/// Hex SHA-256 of the trimmed page text.
pub fn content_hash(raw_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_text.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

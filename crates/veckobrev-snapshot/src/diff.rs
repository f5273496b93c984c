//! Compare a stored snapshot with the current one.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::warn;

use crate::model::{EventRecord, HighlightMap, SchoolState, Snapshot};

/// What changed since the stored snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Persons whose school page changed.
    pub school_changed: BTreeSet<String>,
    /// Current events absent from the stored snapshot, in current order.
    pub new_events: Vec<EventRecord>,
}

impl DiffResult {
    /// Nothing to report.
    pub fn is_empty(&self) -> bool {
        self.school_changed.is_empty() && self.new_events.is_empty()
    }
}

/// Diff two snapshots of the same week.
///
/// School pages are compared only when both snapshots use the same mode;
/// otherwise no school change is reported. Calendar events are matched on
/// `(person, start, summary)`; `end` and `location` are ignored.
pub fn diff(stored: &Snapshot, current: &Snapshot) -> DiffResult {
    DiffResult {
        school_changed: school_changes(&stored.school, &current.school),
        new_events: new_events(&stored.calendar, &current.calendar),
    }
}

fn school_changes(stored: &SchoolState, current: &SchoolState) -> BTreeSet<String> {
    match (stored, current) {
        (SchoolState::Hashes(old), SchoolState::Hashes(new)) => new
            .iter()
            .filter(|(person, hash)| old.get(*person) != Some(*hash))
            .map(|(person, _)| person.clone())
            .collect(),
        (SchoolState::Highlights(old), SchoolState::Highlights(new)) => new
            .iter()
            .filter(|(person, lines)| !added_lines(old.get(*person), lines).is_empty())
            .map(|(person, _)| person.clone())
            .collect(),
        _ => {
            warn!(
                stored = ?stored.mode(),
                current = ?current.mode(),
                "school mode differs from stored snapshot, skipping school diff"
            );
            BTreeSet::new()
        }
    }
}

fn new_events(stored: &[EventRecord], current: &[EventRecord]) -> Vec<EventRecord> {
    let known: HashSet<_> = stored.iter().map(EventRecord::key).collect();
    current
        .iter()
        .filter(|e| !known.contains(&e.key()))
        .cloned()
        .collect()
}

/// Lines of `current` missing from `stored`, in current order.
fn added_lines<'a>(stored: Option<&Vec<String>>, current: &'a [String]) -> Vec<&'a String> {
    let old: HashSet<&String> = stored.into_iter().flatten().collect();
    current.iter().filter(|l| !old.contains(l)).collect()
}

/// New highlight lines per changed person, for the notification.
///
/// Uses `school_highlights` when both snapshots have them, else the
/// digest-parsed lines when both snapshots have an entry for that person.
/// A person with neither gets no entry and is shown as changed without
/// detail.
pub fn resolve_school_updates(
    stored: &Snapshot,
    current: &Snapshot,
    changed: &BTreeSet<String>,
) -> BTreeMap<String, Vec<String>> {
    let mut updates = BTreeMap::new();
    for person in changed {
        let lines = lines_from(stored.school.highlights(), current.school.highlights(), person)
            .or_else(|| {
                lines_from(
                    stored.school_digest_highlights.as_ref(),
                    current.school_digest_highlights.as_ref(),
                    person,
                )
            });
        if let Some(lines) = lines.filter(|l| !l.is_empty()) {
            let _ = updates.insert(person.clone(), lines);
        }
    }
    updates
}

fn lines_from(
    stored: Option<&HighlightMap>,
    current: Option<&HighlightMap>,
    person: &str,
) -> Option<Vec<String>> {
    let old = stored?.get(person)?;
    let new = current?.get(person)?;
    Some(added_lines(Some(old), new).into_iter().cloned().collect())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

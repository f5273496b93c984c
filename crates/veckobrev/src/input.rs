//! The per-run input file.
//!
//! Fetching school pages and calendars happens outside this program; a run
//! hands over what was fetched as one JSON document:
//!
//! ```json
//! {
//!   "school": [
//!     { "person": "Olle", "classLabel": "8B", "url": "https://...", "html": "<html>..." },
//!     { "person": "Stina", "error": "HTTP 503" }
//!   ],
//!   "calendar": [
//!     { "person": "Olle", "events": [{ "summary": "Fotboll", "start": "2025-02-10T17:00:00+01:00" }] },
//!     { "persons": ["Olle", "Stina"], "events": [] }
//!   ],
//!   "calendarError": null
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use veckobrev_core::calendar::group_calendars;
use veckobrev_core::{CalendarEvent, EventsByPerson, RawSchoolBlock, SchoolInfo};
use veckobrev_extract::{ExtractionRules, PageSource, html_to_text, school_info_from_fetch};

/// One run's fetched data.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    /// School pages, in digest order.
    #[serde(default)]
    pub school: Vec<SchoolEntry>,
    /// Fetched calendars and whom they belong to.
    #[serde(default)]
    pub calendar: Vec<CalendarEntry>,
    /// Set when the calendars could not be fetched at all.
    #[serde(default)]
    pub calendar_error: Option<String>,
}

/// A fetched (or failed) school page.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolEntry {
    /// Person the page belongs to.
    pub person: String,
    /// Class label shown next to the name.
    #[serde(default)]
    pub class_label: Option<String>,
    /// Where the page was fetched from.
    #[serde(default)]
    pub url: String,
    /// Page as plain text.
    #[serde(default)]
    pub text: Option<String>,
    /// Page as HTML; used when `text` is absent.
    #[serde(default)]
    pub html: Option<String>,
    /// Fetch failure.
    #[serde(default)]
    pub error: Option<String>,
}

/// One calendar shown for one or more persons.
///
/// An empty `person` is the unassigned calendar.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CalendarEntry {
    /// Single owner.
    #[serde(default)]
    pub person: Option<String>,
    /// Several owners sharing the calendar.
    #[serde(default)]
    pub persons: Vec<String>,
    /// Parsed events.
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
}

impl RunInput {
    /// Read and decode an input file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid input: {}", path.display()))
    }

    /// Decode an input document.
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Names of the persons with a school entry, in order.
    pub fn person_names(&self) -> Vec<String> {
        self.school.iter().map(|s| s.person.clone()).collect()
    }

    /// Calendars spread over their owners.
    pub fn events_by_person(&self) -> EventsByPerson {
        group_calendars(
            self.calendar
                .iter()
                .map(|entry| (entry.owners(), entry.events.clone()))
                .collect(),
        )
    }

    /// Run rule-based extraction over every school page.
    pub fn school_infos(&self, target_week: Option<u32>, rules: &ExtractionRules) -> Vec<SchoolInfo> {
        self.school
            .iter()
            .map(|entry| school_info_from_fetch(entry.source(), entry.page_text(), target_week, rules))
            .collect()
    }

    /// School pages as raw blocks for an external summarizer.
    pub fn raw_blocks(&self) -> Vec<RawSchoolBlock> {
        self.school.iter().map(SchoolEntry::to_raw_block).collect()
    }
}

impl SchoolEntry {
    fn source(&self) -> PageSource<'_> {
        PageSource {
            person_name: &self.person,
            class_label: self.class_label.as_deref(),
            url: &self.url,
        }
    }

    /// Page text, or the reason there is none.
    pub fn page_text(&self) -> std::result::Result<String, String> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        match (&self.text, &self.html) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(html)) => Ok(html_to_text(html)),
            (None, None) => Err("no page content".to_string()),
        }
    }

    fn to_raw_block(&self) -> RawSchoolBlock {
        let (raw_text, error) = match self.page_text() {
            Ok(text) => (Some(text), None),
            Err(e) => (None, Some(e)),
        };
        RawSchoolBlock {
            person_name: self.person.clone(),
            class_label: self.class_label.clone(),
            raw_text,
            error,
        }
    }
}

impl CalendarEntry {
    fn owners(&self) -> Vec<String> {
        self.person
            .iter()
            .chain(&self.persons)
            .cloned()
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

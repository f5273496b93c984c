//! School page results, one per person per run.

use serde::{Deserialize, Serialize};

/// Parsed school page for one person.
///
/// Produced by the extraction pipeline. When `error` is set the page could
/// not be fetched or parsed and `highlights` is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInfo {
    /// Person the page belongs to.
    pub person_name: String,
    /// Class label shown next to the name, e.g. `8B`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_label: Option<String>,
    /// Where the page text came from.
    pub source_url: String,
    /// Week number announced by the page itself (`Vecka 6`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_week: Option<u32>,
    /// `**Subject:** description` lines in extraction order.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Fetch or parse failure for this person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SchoolInfo {
    /// A result carrying only an error.
    pub fn failed(
        person_name: impl Into<String>,
        class_label: Option<String>,
        source_url: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            person_name: person_name.into(),
            class_label,
            source_url: source_url.into(),
            extracted_week: None,
            highlights: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Display heading: `Name` or `Name (Class)`.
    pub fn heading(&self) -> String {
        person_heading(&self.person_name, self.class_label.as_deref())
    }
}

/// Raw page text for one person, used when extraction happens elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchoolBlock {
    /// Person the page belongs to.
    pub person_name: String,
    /// Class label shown next to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_label: Option<String>,
    /// Fetched page text; `None` when fetching failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    /// Fetch failure for this person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RawSchoolBlock {
    /// Turn the block into an empty [`SchoolInfo`] that keeps the error, for
    /// template rendering when no summarizer output is available.
    pub fn to_school_info(&self, target_week: Option<u32>) -> SchoolInfo {
        SchoolInfo {
            person_name: self.person_name.clone(),
            class_label: self.class_label.clone(),
            source_url: String::new(),
            extracted_week: target_week,
            highlights: Vec::new(),
            error: self.error.clone(),
        }
    }
}

/// `Name` or `Name (Class)`.
pub fn person_heading(person_name: &str, class_label: Option<&str>) -> String {
    match class_label {
        Some(label) if !label.is_empty() => format!("{person_name} ({label})"),
        _ => person_name.to_owned(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

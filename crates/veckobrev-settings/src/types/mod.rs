//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and implement
//! [`Default`] with production values. Every struct is `#[serde(default)]`,
//! so a partial JSON file only needs the keys it changes.

mod labels;
mod rules;

pub use labels::*;
pub use rules::*;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings type.
///
/// Loaded from `~/.veckobrev/settings.json` with defaults applied for
/// missing fields. Environment variables can override specific values.
///
/// ```json
/// {
///   "persons": [{ "name": "Olle", "classLabel": "8B", "url": "https://skola.example/8b" }],
///   "calendar": { "timezone": "Europe/Stockholm" }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VeckobrevSettings {
    /// Persons with a school page, in digest order.
    pub persons: Vec<PersonSettings>,
    /// Snapshot persistence.
    pub snapshot: SnapshotSettings,
    /// Calendar presentation.
    pub calendar: CalendarSettings,
    /// School extraction mode.
    pub extraction: ExtractionSettings,
    /// Extraction vocabulary.
    pub rules: RuleSettings,
    /// Words used in rendered output.
    pub labels: LabelSettings,
}

impl VeckobrevSettings {
    /// Names of all configured persons, in order.
    pub fn person_names(&self) -> Vec<String> {
        self.persons.iter().map(|p| p.name.clone()).collect()
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        self.labels.validate()?;
        if self.snapshot.dir.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "snapshot.dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// One person and their school page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonSettings {
    /// Display name; also the key in snapshots.
    pub name: String,
    /// Class label, e.g. `8B`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_label: Option<String>,
    /// School page URL.
    pub url: String,
}

/// Where week snapshots are written.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotSettings {
    /// Snapshot directory. A leading `~/` expands to `$HOME`.
    pub dir: String,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            dir: "~/.veckobrev/snapshots".to_string(),
        }
    }
}

impl SnapshotSettings {
    /// The snapshot directory with `~/` expanded.
    pub fn resolved_dir(&self) -> PathBuf {
        expand_home(&self.dir)
    }
}

/// Calendar presentation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarSettings {
    /// IANA timezone used to place events on days.
    pub timezone: String,
    /// Person label for events from the unassigned/global calendar.
    pub other_label: String,
    /// Calendar group whose events the whole family attends.
    pub family_calendar: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            timezone: "Europe/Stockholm".to_string(),
            other_label: "Övrigt".to_string(),
            family_calendar: "Familjen".to_string(),
        }
    }
}

/// School extraction mode.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionSettings {
    /// Hand raw page text to an external summarizer instead of running the
    /// rule-based pipeline. Snapshots then store content hashes.
    pub use_raw_extraction: bool,
}

/// Expand a leading `~/` using `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(rest)
        }
        None => PathBuf::from(path),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        VeckobrevSettings::default().validate().unwrap();
    }

    #[test]
    fn empty_snapshot_dir_rejected() {
        let mut settings = VeckobrevSettings::default();
        settings.snapshot.dir = "  ".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn person_names_in_order() {
        let settings = VeckobrevSettings {
            persons: vec![
                PersonSettings {
                    name: "Stina".into(),
                    class_label: None,
                    url: String::new(),
                },
                PersonSettings {
                    name: "Olle".into(),
                    class_label: Some("8B".into()),
                    url: String::new(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(settings.person_names(), ["Stina", "Olle"]);
    }

    #[test]
    fn absolute_path_not_expanded() {
        assert_eq!(expand_home("/var/lib/veckobrev"), PathBuf::from("/var/lib/veckobrev"));
    }

    #[test]
    fn tilde_path_expanded() {
        let expanded = expand_home("~/.veckobrev/snapshots");
        assert!(expanded.ends_with(".veckobrev/snapshots"));
        assert!(!expanded.starts_with("~"));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(VeckobrevSettings::default()).unwrap();
        assert_eq!(json["calendar"]["otherLabel"], "Övrigt");
        assert_eq!(json["extraction"]["useRawExtraction"], false);
        assert_eq!(json["rules"]["maxLineChars"], 500);
    }
}

//! Extraction vocabulary.
//!
//! Tuned for Swedish school portals. Swap the lists per deployment; the
//! extraction pipeline compiles them once into matchers.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Rule vocabulary for the highlight extraction pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSettings {
    /// Subject headers to segment on. Order is kept for ties.
    pub subject_headers: Vec<String>,
    /// Whole-word keywords marking tests, homework and deadlines.
    pub important_keywords: Vec<String>,
    /// Subjects where equipment reminders count as highlights.
    pub equipment_subjects: Vec<String>,
    /// Substrings that mark an equipment reminder (case-insensitive).
    pub equipment_terms: Vec<String>,
    /// Subjects whose bare week-range lines pull in following lines.
    pub context_subjects: Vec<String>,
    /// Phrases meaning "this week" / "next week"; lines with them are always in-window.
    pub relative_week_phrases: Vec<String>,
    /// Regexes (case-insensitive) for boilerplate rejected when the line has no week reference.
    pub boilerplate_patterns: Vec<String>,
    /// Regexes (case-insensitive) for lines that stop context joining.
    pub promo_markers: Vec<String>,
    /// Lines longer than this many characters are never highlights.
    pub max_line_chars: usize,
    /// Maximum context lines appended to a week-range line.
    pub max_context_lines: usize,
    /// Each context line is cut to this many characters, ellipsis included.
    pub max_context_chars: usize,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            subject_headers: strings(&[
                "Svenska",
                "Matematik",
                "Engelska",
                "NO",
                "SO",
                "Idrott och hälsa",
                "Musik",
                "Bild",
                "Slöjd",
                "Franska",
                "Spanska",
                "Tyska",
                "Español",
            ]),
            important_keywords: strings(&[
                "prov",
                "provet",
                "läxa",
                "läxan",
                "läxor",
                "förhör",
                "förhöret",
                "diagnos",
                "inlämning",
                "deadline",
                "tenta",
                "hemuppgift",
                "glosor",
                "quiz",
                "test",
            ]),
            equipment_subjects: strings(&["Idrott och hälsa", "Musik", "Bild"]),
            equipment_terms: strings(&["ta med", "dusch", "ombyte", "idrottskläder"]),
            context_subjects: strings(&["Engelska"]),
            relative_week_phrases: strings(&[
                "denna vecka",
                "nästa vecka",
                "den här veckan",
                "this week",
                "next week",
            ]),
            boilerplate_patterns: strings(&[
                r"^(?:prov|test)\s*[:!.]?$",
                r"^(?:välkommen till|här hittar du|här kan du läsa)\b",
            ]),
            promo_markers: strings(&[r"^(?:läs mer|se mer|klicka här)\b"]),
            max_line_chars: 500,
            max_context_lines: 5,
            max_context_chars: 220,
        }
    }
}

impl RuleSettings {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.subject_headers.iter().all(|h| h.trim().is_empty()) {
            return Err(SettingsError::InvalidValue(
                "rules.subjectHeaders must name at least one subject".into(),
            ));
        }
        if self.max_line_chars == 0 {
            return Err(SettingsError::InvalidValue(
                "rules.maxLineChars must be positive".into(),
            ));
        }
        if self.max_context_chars < 2 {
            return Err(SettingsError::InvalidValue(
                "rules.maxContextChars must leave room for the ellipsis".into(),
            ));
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Compiled extraction rules.
//!
//! [`ExtractionRules`] is built once from [`RuleSettings`] and passed by
//! reference into every stage. It is immutable; swapping vocabulary means
//! building a new one.

use std::sync::LazyLock;

use regex::Regex;
use veckobrev_settings::RuleSettings;

use crate::errors::{ExtractError, Result};

/// `v 6`, `v.6`, `V.8`, `vecka 6`, `week 6`.
pub(crate) static WEEK_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:v(?:ecka)?|week)\.?\s*(\d{1,2})\b").unwrap()
});

/// `7-11`, `v7-11`, `Week 3 - 8`, `v. 7–11`.
///
/// No leading `\b`: in `v7-11` the `7` follows a word character.
pub(crate) static WEEK_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(\d{1,2})\s*[-–]\s*(\d{1,2})\b").unwrap()
});

/// A line that is only a week-range marker, optionally followed by a colon.
pub(crate) static WEEK_RANGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:v(?:ecka)?|week)?\.?\s*\d{1,2}\s*[-–]\s*\d{1,2}\s*:?$").unwrap()
});

/// A subject header and the pattern that finds it in page text.
#[derive(Debug)]
pub struct SubjectHeader {
    /// Header label as configured, used in highlight lines.
    pub name: String,
    pattern: Regex,
}

impl SubjectHeader {
    /// Byte offset of the first case-insensitive occurrence that starts on a
    /// word boundary and ends the line or is followed by `:`.
    pub fn find_in(&self, text: &str) -> Option<usize> {
        self.pattern.find(text).map(|m| m.start())
    }

    /// Whether `line` is this header on its own, optionally followed by
    /// `:` (case-insensitive). A sentence that merely begins with the
    /// header word, like "No class on Monday", is not.
    pub fn is_line(&self, line: &str) -> bool {
        let bare = line.trim().trim_end_matches(':').trim_end();
        bare.to_lowercase() == self.name.to_lowercase()
    }
}

/// Immutable, compiled form of [`RuleSettings`].
#[derive(Debug)]
pub struct ExtractionRules {
    pub(crate) headers: Vec<SubjectHeader>,
    pub(crate) important: Option<Regex>,
    pub(crate) equipment_subjects: Vec<String>,
    pub(crate) equipment_terms: Vec<String>,
    pub(crate) context_subjects: Vec<String>,
    pub(crate) relative_week_phrases: Vec<String>,
    pub(crate) boilerplate: Vec<Regex>,
    pub(crate) promo_markers: Vec<Regex>,
    pub(crate) max_line_chars: usize,
    pub(crate) max_context_lines: usize,
    pub(crate) max_context_chars: usize,
}

impl ExtractionRules {
    /// Compile the configured vocabulary.
    pub fn new(settings: &RuleSettings) -> Result<Self> {
        let headers = settings
            .subject_headers
            .iter()
            .filter(|h| !h.trim().is_empty())
            .map(|h| {
                let name = h.trim().to_string();
                let pattern = Regex::new(&format!(r"(?im)\b{}[ \t]*(?::|\r?$)", regex::escape(&name)))
                    .map_err(|source| ExtractError::InvalidPattern {
                        name: "subject header",
                        source,
                    })?;
                Ok(SubjectHeader { name, pattern })
            })
            .collect::<Result<Vec<_>>>()?;

        let keywords: Vec<String> = settings
            .important_keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .map(|k| regex::escape(k.trim()))
            .collect();
        let important = if keywords.is_empty() {
            None
        } else {
            Some(
                Regex::new(&format!(r"(?i)\b(?:{})\b", keywords.join("|"))).map_err(
                    |source| ExtractError::InvalidPattern {
                        name: "important keyword",
                        source,
                    },
                )?,
            )
        };

        Ok(Self {
            headers,
            important,
            equipment_subjects: lowercased(&settings.equipment_subjects),
            equipment_terms: lowercased(&settings.equipment_terms),
            context_subjects: lowercased(&settings.context_subjects),
            relative_week_phrases: lowercased(&settings.relative_week_phrases),
            boilerplate: compile_all(&settings.boilerplate_patterns, "boilerplate")?,
            promo_markers: compile_all(&settings.promo_markers, "promo marker")?,
            max_line_chars: settings.max_line_chars,
            max_context_lines: settings.max_context_lines,
            max_context_chars: settings.max_context_chars,
        })
    }

    /// Subject headers in configured order.
    pub fn headers(&self) -> &[SubjectHeader] {
        &self.headers
    }

    /// Whether `line` is a bare subject header line.
    pub fn is_subject_header(&self, line: &str) -> bool {
        self.headers.iter().any(|h| h.is_line(line))
    }

    /// Whether `line` is a promo marker that ends context joining.
    pub fn is_promo_marker(&self, line: &str) -> bool {
        self.promo_markers.iter().any(|re| re.is_match(line))
    }

    pub(crate) fn is_equipment_subject(&self, subject: &str) -> bool {
        contains_ignore_case(&self.equipment_subjects, subject)
    }

    pub(crate) fn is_context_subject(&self, subject: &str) -> bool {
        contains_ignore_case(&self.context_subjects, subject)
    }
}

impl Default for ExtractionRules {
    fn default() -> Self {
        // The compiled-in vocabulary is known to be valid.
        Self::new(&RuleSettings::default()).unwrap_or_else(|_| unreachable!())
    }
}

fn compile_all(patterns: &[String], name: &'static str) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(&format!("(?i){p}"))
                .map_err(|source| ExtractError::InvalidPattern { name, source })
        })
        .collect()
}

fn lowercased(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.trim().to_lowercase()).collect()
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    haystack.iter().any(|s| *s == needle)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

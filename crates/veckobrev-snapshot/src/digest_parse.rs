//! Read per-person highlight lines back out of a rendered digest.
//!
//! The digest's school section is what was actually sent, which may differ
//! from the raw extraction when a summarizer rewrote it. Parsing it back
//! gives the diff something to compare line by line.

use crate::model::HighlightMap;

/// Section headings that bound the school section.
#[derive(Clone, Copy, Debug)]
pub struct SectionLabels<'a> {
    /// School heading text after `##`, e.g. `Skola`.
    pub school: &'a str,
    /// Heading that ends the school section, e.g. `Kalender`.
    pub calendar: &'a str,
}

impl Default for SectionLabels<'_> {
    fn default() -> Self {
        Self {
            school: "Skola",
            calendar: "Kalender",
        }
    }
}

/// Parse the school section of `digest` into lines per known person.
///
/// Every name in `person_names` gets an entry, empty when nothing was found.
/// A heading `**Name (Class):**`, `**Name:**` or `**Name (Class)**` switches
/// the current person; `**Subject:** ...` lines below it are collected.
pub fn parse_school_section(
    digest: &str,
    person_names: &[String],
    labels: SectionLabels<'_>,
) -> HighlightMap {
    let mut out: HighlightMap = person_names
        .iter()
        .map(|p| (p.clone(), Vec::new()))
        .collect();
    if digest.is_empty() || person_names.is_empty() {
        return out;
    }

    let mut in_section = false;
    let mut current: Option<&str> = None;

    for raw in digest.lines() {
        let line = raw.trim();
        if let Some(heading) = level_two_heading(line) {
            if is_heading(heading, labels.school) {
                in_section = true;
                continue;
            }
            if in_section && is_heading(heading, labels.calendar) {
                break;
            }
        }
        if !in_section || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("- ").map_or(line, str::trim);

        if line.starts_with("**") {
            let (head, tail) = split_bold_heading(line);
            if let Some(person) = match_person(head, person_names) {
                current = Some(person);
                let tail = tail.trim();
                if is_content(tail) {
                    push(&mut out, person, tail);
                }
                continue;
            }
        }

        if let Some(person) = current.filter(|_| is_content(line)) {
            push(&mut out, person, line);
        }
    }
    out
}

/// Text after `##` (any number of extra spaces), for lines that are
/// second-level headings.
fn level_two_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    if rest.starts_with('#') {
        return None;
    }
    Some(rest.trim_start())
}

/// `heading` starts with `label` followed by a non-word character or the end.
fn is_heading(heading: &str, label: &str) -> bool {
    heading
        .strip_prefix(label)
        .is_some_and(|rest| !rest.chars().next().is_some_and(char::is_alphanumeric))
}

/// Split `**Head:** tail` or `**Head**` into `(Head, tail)`.
fn split_bold_heading(line: &str) -> (&str, &str) {
    let inner = &line[2..];
    if let Some(idx) = inner.find(":**") {
        return (inner[..idx].trim(), &inner[idx + 3..]);
    }
    if let Some(head) = inner.strip_suffix("**") {
        return (head.trim(), "");
    }
    ("", "")
}

fn match_person<'a>(head: &str, person_names: &'a [String]) -> Option<&'a str> {
    if head.is_empty() {
        return None;
    }
    person_names
        .iter()
        .find(|p| {
            head == p.as_str()
                || head
                    .strip_prefix(p.as_str())
                    .is_some_and(|rest| rest.starts_with(' ') || rest.starts_with('('))
        })
        .map(String::as_str)
}

/// A highlight-shaped line: bold marker and a colon.
fn is_content(line: &str) -> bool {
    line.contains("**") && line.contains(':')
}

fn push(out: &mut HighlightMap, person: &str, line: &str) {
    out.entry(person.to_owned()).or_default().push(line.to_owned());
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    const DIGEST: &str = "\
# Vecka 7 – Veckosammanfattning

## Skola

**Olle (8B):**
**Svenska:** Läxa v.7
**Matematik:** Prov fredag

**Stina (5A):** Inga prov/läxor/förhör hittade denna vecka.

## Kalender (vecka 7)

### Måndag 10 februari
**Olle:** 17:00 – Fotboll
";

    #[test]
    fn collects_lines_per_person() {
        let out = parse_school_section(DIGEST, &names(&["Olle", "Stina"]), SectionLabels::default());
        assert_eq!(out["Olle"], ["**Svenska:** Läxa v.7", "**Matematik:** Prov fredag"]);
        assert!(out["Stina"].is_empty());
    }

    #[test]
    fn calendar_section_not_included() {
        let out = parse_school_section(DIGEST, &names(&["Olle"]), SectionLabels::default());
        assert!(!out["Olle"].iter().any(|l| l.contains("Fotboll")));
    }

    #[test]
    fn same_line_content_and_list_markers() {
        let digest = "##Skola\n- **Olle (8B):** **NO:** Förhör v.7\n- **SO:** Läxa kapitel 2\n";
        let out = parse_school_section(digest, &names(&["Olle"]), SectionLabels::default());
        assert_eq!(out["Olle"], ["**NO:** Förhör v.7", "**SO:** Läxa kapitel 2"]);
    }

    #[test]
    fn heading_without_colon() {
        let digest = "## Skola\n**Olle (8B)**\n**Bild:** ta med förkläde\n";
        let out = parse_school_section(digest, &names(&["Olle"]), SectionLabels::default());
        assert_eq!(out["Olle"], ["**Bild:** ta med förkläde"]);
    }

    #[test]
    fn name_prefix_needs_separator() {
        // "Ollesson" must not match "Olle"
        let digest = "## Skola\n**Ollesson:**\n**Svenska:** Läxa\n";
        let out = parse_school_section(digest, &names(&["Olle"]), SectionLabels::default());
        assert!(out["Olle"].is_empty());
    }

    #[test]
    fn no_school_section() {
        let out = parse_school_section("## Kalender\n**Olle:** x", &names(&["Olle"]), SectionLabels::default());
        assert!(out["Olle"].is_empty());
    }

    #[test]
    fn skolan_is_not_skola() {
        let digest = "## Skolan\n**Olle:**\n**Svenska:** Läxa\n";
        let out = parse_school_section(digest, &names(&["Olle"]), SectionLabels::default());
        assert!(out["Olle"].is_empty());
    }

    #[test]
    fn custom_labels() {
        let digest = "## School\n**Olle:** **Math:** Quiz\n## Calendar\n**Olle:** **Late:** x";
        let labels = SectionLabels {
            school: "School",
            calendar: "Calendar",
        };
        let out = parse_school_section(digest, &names(&["Olle"]), labels);
        assert_eq!(out["Olle"], ["**Math:** Quiz"]);
    }
}

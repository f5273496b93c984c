//! Template digest rendering.
//!
//! Layout:
//!
//! ```text
//! # Vecka 7 – Veckosammanfattning
//!
//! **Tillsammans:** ...            (only with family calendar events)
//!
//! ## Skola
//! **Olle (8B):**
//! **Svenska:** Läxa v.7
//!
//! ## Kalender (vecka 7)
//! ### Måndag 10 februari
//! **Olle:** 17:00 – Fotboll (Vallen)
//! ```
//!
//! The school section is also read back by the snapshot builder, so its
//! heading shapes must stay parseable.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use veckobrev_core::{CalendarEvent, IsoWeek, PersonEvents, SchoolInfo};
use veckobrev_settings::LabelSettings;

use crate::options::DigestOptions;

/// Summaries listed on the family line before eliding.
const MAX_TOGETHER_SUMMARIES: usize = 5;

/// Render the full weekly digest.
pub fn render_digest(
    infos: &[SchoolInfo],
    events_by_person: &[PersonEvents],
    options: &DigestOptions<'_>,
) -> String {
    let labels = options.labels;
    let mut parts = vec![format!("# {} – {}", title(infos, options), labels.digest_title), String::new()];

    if let Some(line) = together_line(events_by_person, options) {
        parts.push(line);
        parts.push(String::new());
    }

    school_section(&mut parts, infos, labels);
    calendar_section(&mut parts, events_by_person, options);

    parts.join("\n").trim().to_string()
}

fn title(infos: &[SchoolInfo], options: &DigestOptions<'_>) -> String {
    let labels = options.labels;
    options
        .week
        .map(IsoWeek::week)
        .or_else(|| infos.iter().find_map(|i| i.extracted_week))
        .map_or_else(
            || labels.upcoming_week.clone(),
            |week| format!("{} {week}", labels.week),
        )
}

/// `**Tillsammans:** ...` from the first non-empty family calendar group.
fn together_line(events_by_person: &[PersonEvents], options: &DigestOptions<'_>) -> Option<String> {
    let family = options.family_calendar.trim().to_lowercase();
    let group = events_by_person
        .iter()
        .find(|g| g.person.trim().to_lowercase() == family && !g.events.is_empty())?;

    let mut summaries: Vec<&str> = Vec::new();
    for event in &group.events {
        let summary = event.summary.trim();
        if !summary.is_empty() && !summaries.contains(&summary) {
            summaries.push(summary);
        }
    }

    let labels = options.labels;
    let body = match summaries.len() {
        0 => labels.together_fallback.clone(),
        1 => format!("{}: {}.", labels.together_intro, summaries[0]),
        n => {
            let shown = summaries[..n.min(MAX_TOGETHER_SUMMARIES)].join(", ");
            let more = if n > MAX_TOGETHER_SUMMARIES { " …" } else { "" };
            format!("{}: {shown}{more}.", labels.together_intro)
        }
    };
    Some(format!("**{}:** {body}", labels.together))
}

fn school_section(parts: &mut Vec<String>, infos: &[SchoolInfo], labels: &LabelSettings) {
    parts.push(format!("## {}", labels.school_section));
    let mut any_failed = false;
    for info in infos {
        let heading = info.heading();
        if let Some(error) = &info.error {
            parts.push(format!("**{heading}:** {} – {error}", labels.fetch_failed));
            any_failed = true;
        } else if info.highlights.is_empty() {
            parts.push(format!("**{heading}:** {}", labels.no_highlights));
            parts.push(String::new());
        } else {
            parts.push(format!("**{heading}:**"));
            parts.extend(info.highlights.iter().cloned());
            parts.push(String::new());
        }
    }
    if any_failed {
        parts.push(labels.check_pages.clone());
        parts.push(String::new());
    }
}

fn calendar_section(
    parts: &mut Vec<String>,
    events_by_person: &[PersonEvents],
    options: &DigestOptions<'_>,
) {
    let labels = options.labels;
    match options.week {
        Some(week) => parts.push(format!(
            "## {} ({} {})",
            labels.calendar_section,
            labels.week.to_lowercase(),
            week.week()
        )),
        None => parts.push(format!("## {}", labels.calendar_section)),
    }

    if let Some(error) = options.calendar_error {
        parts.push(format!("*{}: {error}*", labels.calendar_failed));
    } else if events_by_person.is_empty() {
        parts.push(labels.no_events_week.clone());
    } else if let Some(week) = options.week {
        day_by_day(parts, week, events_by_person, options);
    } else {
        per_person(parts, events_by_person, options);
    }
}

fn day_by_day(
    parts: &mut Vec<String>,
    week: IsoWeek,
    events_by_person: &[PersonEvents],
    options: &DigestOptions<'_>,
) {
    let labels = options.labels;
    let by_day = group_by_day(events_by_person, options);
    for day in week.days() {
        parts.push(format!(
            "### {} {} {}",
            name_at(&labels.weekdays, day.weekday().num_days_from_monday() as usize),
            day.day(),
            name_at(&labels.months, day.month0() as usize),
        ));
        match by_day.get(&day) {
            Some(persons) => {
                for (person, events) in persons {
                    let shown: Vec<String> = events
                        .iter()
                        .map(|e| short_event(e, options.timezone, labels))
                        .collect();
                    parts.push(format!("**{person}:** {}", shown.join(". ")));
                }
            }
            None => parts.push(labels.no_events_day.clone()),
        }
        parts.push(String::new());
    }
}

fn per_person(parts: &mut Vec<String>, events_by_person: &[PersonEvents], options: &DigestOptions<'_>) {
    let labels = options.labels;
    for group in events_by_person {
        let name = display_person(&group.person, options);
        if group.events.is_empty() {
            parts.push(format!("**{name}:** {}", labels.no_events_day));
        } else {
            parts.push(format!("**{name}:**"));
            for event in &group.events {
                let mut line = format!(
                    "• {} – {}",
                    dated_time(local_time(event.start, options.timezone), labels),
                    event.summary
                );
                push_location(&mut line, event);
                parts.push(line);
            }
        }
        parts.push(String::new());
    }
}

/// Events per local day, then per person (sorted), each list by start.
fn group_by_day<'e>(
    events_by_person: &'e [PersonEvents],
    options: &DigestOptions<'e>,
) -> BTreeMap<NaiveDate, BTreeMap<&'e str, Vec<&'e CalendarEvent>>> {
    let mut by_day: BTreeMap<NaiveDate, BTreeMap<&str, Vec<&CalendarEvent>>> = BTreeMap::new();
    for group in events_by_person {
        let person = display_person(&group.person, options);
        for event in &group.events {
            let day = local_time(event.start, options.timezone).date();
            by_day
                .entry(day)
                .or_default()
                .entry(person)
                .or_default()
                .push(event);
        }
    }
    for persons in by_day.values_mut() {
        for events in persons.values_mut() {
            events.sort_by_key(|e| e.start);
        }
    }
    by_day
}

fn display_person<'e>(person: &'e str, options: &DigestOptions<'e>) -> &'e str {
    if person.is_empty() {
        options.other_label
    } else {
        person
    }
}

fn local_time(start: DateTime<FixedOffset>, timezone: Option<Tz>) -> NaiveDateTime {
    match timezone {
        Some(tz) => start.with_timezone(&tz).naive_local(),
        None => start.naive_local(),
    }
}

/// `HH:MM – Summary (location)`, or the all-day label at midnight.
fn short_event(event: &CalendarEvent, timezone: Option<Tz>, labels: &LabelSettings) -> String {
    let local = local_time(event.start, timezone);
    let time = if local.hour() == 0 && local.minute() == 0 {
        labels.all_day.clone()
    } else {
        local.format("%H:%M").to_string()
    };
    let mut part = format!("{time} – {}", event.summary);
    push_location(&mut part, event);
    part
}

/// `Mån 10/02 17:00`.
fn dated_time(local: NaiveDateTime, labels: &LabelSettings) -> String {
    format!(
        "{} {}",
        name_at(&labels.short_weekdays, local.weekday().num_days_from_monday() as usize),
        local.format("%d/%m %H:%M")
    )
}

fn push_location(line: &mut String, event: &CalendarEvent) {
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        line.push_str(&format!(" ({location})"));
    }
}

fn name_at(names: &[String], index: usize) -> &str {
    names.get(index).map_or("", String::as_str)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

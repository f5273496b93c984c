//! Command implementations shared by the binary and the integration tests.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;
use veckobrev_core::{IsoWeek, SchoolInfo};
use veckobrev_digest::{DigestOptions, next_target_week, render_digest};
use veckobrev_extract::ExtractionRules;
use veckobrev_settings::VeckobrevSettings;
use veckobrev_snapshot::{
    SchoolInput, SectionLabels, Snapshot, SnapshotBuilder, SnapshotStore, diff, format_notification,
    resolve_school_updates,
};

use crate::input::RunInput;

/// Target week from optional CLI values.
///
/// Without a week the run is about next week. A week without a year takes
/// the year of next week.
pub fn resolve_week(week: Option<u32>, year: Option<i32>, today: NaiveDate) -> Result<IsoWeek> {
    let next = next_target_week(today);
    match week {
        None => Ok(next),
        Some(week) => {
            let year = year.unwrap_or_else(|| next.year());
            IsoWeek::new(year, week).context("invalid target week")
        }
    }
}

/// Compile the configured extraction vocabulary.
pub fn compile_rules(settings: &VeckobrevSettings) -> Result<ExtractionRules> {
    ExtractionRules::new(&settings.rules).context("invalid extraction rules in settings")
}

/// School infos for rendering, honoring the configured extraction mode.
///
/// In raw mode pages are not summarized here, so each person is listed
/// without highlights (or with the fetch error).
pub fn school_infos(
    settings: &VeckobrevSettings,
    input: &RunInput,
    week: IsoWeek,
) -> Result<Vec<SchoolInfo>> {
    if settings.extraction.use_raw_extraction {
        return Ok(input
            .raw_blocks()
            .iter()
            .map(|b| b.to_school_info(Some(week.week())))
            .collect());
    }
    let rules = compile_rules(settings)?;
    Ok(input.school_infos(Some(week.week()), &rules))
}

/// Render the template digest for `week`.
pub fn render(settings: &VeckobrevSettings, input: &RunInput, week: IsoWeek) -> Result<String> {
    let infos = school_infos(settings, input, week)?;
    let events = input.events_by_person();
    let options = DigestOptions::from_settings(settings, Some(week))
        .calendar_error(input.calendar_error.as_deref());
    Ok(render_digest(&infos, &events, &options))
}

/// Snapshot of this run, optionally recording the digest that was sent.
///
/// The digest is read back for every configured person, also those with no
/// school page in this run. Without configured persons the names in the
/// run input are used.
pub fn build_snapshot(
    settings: &VeckobrevSettings,
    input: &RunInput,
    week: IsoWeek,
    digest: Option<&str>,
) -> Result<Snapshot> {
    let events = input.events_by_person();
    let mut names = settings.person_names();
    if names.is_empty() {
        names = input.person_names();
    }
    let sections = SectionLabels {
        school: &settings.labels.school_section,
        calendar: &settings.labels.calendar_section,
    };

    let snapshot = if settings.extraction.use_raw_extraction {
        let blocks = input.raw_blocks();
        with_digest(
            SnapshotBuilder::new(week, SchoolInput::Raw(&blocks), &events),
            digest,
            &names,
        )
        .other_label(&settings.calendar.other_label)
        .sections(sections)
        .build()
    } else {
        let rules = compile_rules(settings)?;
        let infos = input.school_infos(Some(week.week()), &rules);
        with_digest(
            SnapshotBuilder::new(week, SchoolInput::RuleBased(&infos), &events),
            digest,
            &names,
        )
        .other_label(&settings.calendar.other_label)
        .sections(sections)
        .build()
    };
    Ok(snapshot)
}

fn with_digest<'a>(
    builder: SnapshotBuilder<'a>,
    digest: Option<&'a str>,
    names: &'a [String],
) -> SnapshotBuilder<'a> {
    match digest {
        Some(body) => builder.digest(body, names),
        None => builder,
    }
}

/// Store `snapshot` as the baseline for its week.
pub fn capture(store: &dyn SnapshotStore, snapshot: &Snapshot) -> Result<()> {
    store
        .put(snapshot)
        .with_context(|| format!("failed to store snapshot for {}", snapshot.week))?;
    info!(week = %snapshot.week, "snapshot captured");
    Ok(())
}

/// Compare `current` with the stored baseline of its week.
///
/// Returns the notification text, or `None` when there is no baseline or
/// nothing changed. With `update` the current snapshot replaces the
/// baseline afterwards (also when there was none).
pub fn check_updates(
    store: &dyn SnapshotStore,
    current: &Snapshot,
    settings: &VeckobrevSettings,
    update: bool,
) -> Result<Option<String>> {
    let stored = store
        .get(current.week)
        .with_context(|| format!("failed to load snapshot for {}", current.week))?;

    let message = match stored {
        None => {
            info!(week = %current.week, "no baseline snapshot, nothing to compare");
            None
        }
        Some(stored) => {
            let result = diff(&stored, current);
            if result.is_empty() {
                info!(week = %current.week, "no changes since baseline");
                None
            } else {
                info!(
                    week = %current.week,
                    school = result.school_changed.len(),
                    events = result.new_events.len(),
                    "changes since baseline"
                );
                let updates = resolve_school_updates(&stored, current, &result.school_changed);
                Some(format_notification(current.week, &result, &updates, &settings.labels))
            }
        }
    };

    if update {
        capture(store, current)?;
    }
    Ok(message)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use veckobrev_settings::PersonSettings;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_defaults_to_next() {
        let week = resolve_week(None, None, day(2025, 2, 6)).unwrap();
        assert_eq!(week, IsoWeek::new(2025, 7).unwrap());
    }

    #[test]
    fn explicit_week_takes_next_weeks_year() {
        let week = resolve_week(Some(2), None, day(2024, 12, 30)).unwrap();
        assert_eq!((week.year(), week.week()), (2025, 2));
        let week = resolve_week(Some(40), Some(2023), day(2024, 12, 30)).unwrap();
        assert_eq!((week.year(), week.week()), (2023, 40));
    }

    #[test]
    fn nonexistent_week_rejected() {
        assert!(resolve_week(Some(53), Some(2025), day(2025, 2, 6)).is_err());
        assert!(resolve_week(Some(0), None, day(2025, 2, 6)).is_err());
    }

    #[test]
    fn digest_read_back_for_configured_person_without_page() {
        let mut settings = VeckobrevSettings::default();
        settings.persons = ["Olle", "Stina"]
            .into_iter()
            .map(|name| PersonSettings {
                name: name.into(),
                class_label: None,
                url: String::new(),
            })
            .collect();
        let input = RunInput::parse(r#"{"school": [{"person": "Olle", "text": "Svenska\nProv v.7"}]}"#)
            .unwrap();
        let digest = "## Skola\n**Olle:**\n**Svenska:** Prov v.7\n**Stina:**\n**Bild:** Ta med förkläde\n";

        let snapshot =
            build_snapshot(&settings, &input, IsoWeek::new(2025, 7).unwrap(), Some(digest)).unwrap();
        let parsed = snapshot.school_digest_highlights.unwrap();
        assert_eq!(parsed["Stina"], ["**Bild:** Ta med förkläde"]);
        assert_eq!(parsed["Olle"], ["**Svenska:** Prov v.7"]);
    }

    #[test]
    fn digest_read_back_falls_back_to_input_names() {
        let input = RunInput::parse(r#"{"school": [{"person": "Olle", "text": "Svenska\nProv v.7"}]}"#)
            .unwrap();
        let digest = "## Skola\n**Olle (8B):**\n**Svenska:** Prov v.7\n";
        let snapshot = build_snapshot(
            &VeckobrevSettings::default(),
            &input,
            IsoWeek::new(2025, 7).unwrap(),
            Some(digest),
        )
        .unwrap();
        assert_eq!(
            snapshot.school_digest_highlights.unwrap()["Olle"],
            ["**Svenska:** Prov v.7"]
        );
    }

    #[test]
    fn raw_mode_lists_persons_without_highlights() {
        let mut settings = VeckobrevSettings::default();
        settings.extraction.use_raw_extraction = true;
        let input = RunInput::parse(
            r#"{"school": [{"person": "Olle", "text": "Svenska\nProv v.7"}, {"person": "Kim", "error": "timeout"}]}"#,
        )
        .unwrap();
        let infos = school_infos(&settings, &input, IsoWeek::new(2025, 7).unwrap()).unwrap();
        assert!(infos[0].highlights.is_empty());
        assert!(infos[0].error.is_none());
        assert_eq!(infos[1].error.as_deref(), Some("timeout"));
    }
}

//! Reading `settings.json` and layering it over defaults and `VECKOBREV_*`
//! environment variables.
//!
//! Order: compiled defaults, then the file (deep-merged, see
//! [`deep_merge`]), then the environment, then [`VeckobrevSettings::validate`].
//! A missing file is not an error.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::{PersonSettings, VeckobrevSettings};

/// `~/.veckobrev/settings.json`.
pub fn settings_path() -> PathBuf {
    crate::types::expand_home("~/.veckobrev/settings.json")
}

/// Load from [`settings_path`].
pub fn load_settings() -> Result<VeckobrevSettings> {
    load_settings_from_path(&settings_path())
}

/// Load from `path`, falling back to defaults when it does not exist.
pub fn load_settings_from_path(path: &Path) -> Result<VeckobrevSettings> {
    let mut settings = read_settings_file(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

/// Defaults merged with the file at `path`, without env overrides.
fn read_settings_file(path: &Path) -> Result<VeckobrevSettings> {
    let json_err = |source: serde_json::Error| SettingsError::Json {
        path: Some(path.to_path_buf()),
        source,
    };
    let mut merged = serde_json::to_value(VeckobrevSettings::default())
        .map_err(|source| SettingsError::Json { path: None, source })?;

    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(?path, "merging settings file over defaults");
            let user: Value = serde_json::from_str(&content).map_err(json_err)?;
            merged = deep_merge(merged, user);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(?path, "no settings file, using defaults");
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    serde_json::from_value(merged).map_err(json_err)
}

/// Overlay `overlay` onto `base`.
///
/// Objects merge key by key, `null` in the overlay keeps the base value, and
/// anything else (arrays included) replaces the base value outright.
pub fn deep_merge(mut base: Value, overlay: Value) -> Value {
    merge_into(&mut base, overlay);
    base
}

fn merge_into(slot: &mut Value, overlay: Value) {
    match (slot, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                if !value.is_null() {
                    merge_into(base.entry(key).or_insert(Value::Null), value);
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Overlay `VECKOBREV_*` variables onto `settings`.
///
/// | Variable | Field |
/// |---|---|
/// | `VECKOBREV_SNAPSHOT_DIR` | `snapshot.dir` |
/// | `VECKOBREV_TIMEZONE` | `calendar.timezone` |
/// | `VECKOBREV_RAW_EXTRACTION` | `extraction.useRawExtraction` (see [`parse_bool`]) |
/// | `VECKOBREV_PERSONS` | `persons` (see [`parse_person_list`]) |
///
/// Unparseable values are logged and leave the field alone.
pub fn apply_env_overrides(settings: &mut VeckobrevSettings) {
    if let Some(dir) = env_value("VECKOBREV_SNAPSHOT_DIR") {
        settings.snapshot.dir = dir;
    }
    if let Some(tz) = env_value("VECKOBREV_TIMEZONE") {
        settings.calendar.timezone = tz;
    }
    if let Some(raw) = env_value("VECKOBREV_RAW_EXTRACTION") {
        match parse_bool(&raw) {
            Some(on) => settings.extraction.use_raw_extraction = on,
            None => warn!(var = "VECKOBREV_RAW_EXTRACTION", value = %raw, "not a boolean, ignored"),
        }
    }
    if let Some(raw) = env_value("VECKOBREV_PERSONS") {
        let persons = parse_person_list(&raw);
        if persons.is_empty() {
            warn!(var = "VECKOBREV_PERSONS", value = %raw, "no usable entries, ignored");
        } else {
            settings.persons = persons;
        }
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`, any case.
pub fn parse_bool(val: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "1", "yes", "on"];
    const FALSE: [&str; 4] = ["false", "0", "no", "off"];
    let val = val.trim();
    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(val)) {
        Some(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(val)) {
        Some(false)
    } else {
        None
    }
}

/// Comma-separated `name|url` or `name|class|url` entries.
///
/// Entries missing a name or URL, or with another field count, are dropped.
pub fn parse_person_list(val: &str) -> Vec<PersonSettings> {
    val.split(',')
        .filter_map(|entry| {
            let fields: Vec<&str> = entry.split('|').map(str::trim).collect();
            let (name, class_label, url) = match fields.as_slice() {
                [name, url] => (*name, None, *url),
                [name, class, url] => (*name, Some(*class).filter(|c| !c.is_empty()), *url),
                _ => return None,
            };
            (!name.is_empty() && !url.is_empty()).then(|| PersonSettings {
                name: name.to_owned(),
                class_label: class_label.map(str::to_owned),
                url: url.to_owned(),
            })
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

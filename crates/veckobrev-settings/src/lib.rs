//! # veckobrev-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`VeckobrevSettings::default()`]
//! 2. **User file**: `~/.veckobrev/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `VECKOBREV_*` overrides (highest priority)
//!
//! The rule vocabulary ([`RuleSettings`]) and output words
//! ([`LabelSettings`]) live here so a deployment can swap language without
//! touching the extraction or diff code.
//!
//! # Usage
//!
//! ```no_run
//! use veckobrev_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("snapshots in {}", settings.snapshot.resolved_dir().display());
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    deep_merge, load_settings, load_settings_from_path, parse_person_list, settings_path,
};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

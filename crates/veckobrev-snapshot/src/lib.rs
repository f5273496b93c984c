//! # veckobrev-snapshot
//!
//! Per-week snapshots and change detection.
//!
//! A capture run builds a [`Snapshot`] of the target week and stores it; a
//! later run builds a fresh one, diffs it against the stored one, and
//! formats what changed:
//!
//! ```text
//! SnapshotBuilder ──build──▶ Snapshot ──put──▶ SnapshotStore
//!                                                 │ get
//!                       current Snapshot ──diff──▶ DiffResult ──▶ format_notification
//! ```
//!
//! ## Crate Position
//!
//! Depends on: veckobrev-core, veckobrev-settings.
//! Depended on by: veckobrev (CLI).

#![deny(unsafe_code)]

pub mod builder;
pub mod diff;
pub mod digest_parse;
pub mod errors;
pub mod model;
pub mod notify;
pub mod store;

pub use builder::{SchoolInput, SnapshotBuilder, content_hash};
pub use diff::{DiffResult, diff, resolve_school_updates};
pub use digest_parse::{SectionLabels, parse_school_section};
pub use errors::{Result, SnapshotError};
pub use model::{EventRecord, HighlightMap, SchoolMode, SchoolState, Snapshot};
pub use notify::format_notification;
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};

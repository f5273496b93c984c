//! # veckobrev
//!
//! Command-line front end: reads one run's fetched school pages and
//! calendars, renders the weekly digest, and captures or diffs week
//! snapshots.
//!
//! ## Crate Position
//!
//! Top-level binary crate. Depends on every other veckobrev crate.

#![deny(unsafe_code)]

pub mod input;
pub mod run;

pub use input::{CalendarEntry, RunInput, SchoolEntry};

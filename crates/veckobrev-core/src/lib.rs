//! # veckobrev-core
//!
//! Foundation types, errors, and utilities shared by every veckobrev crate:
//!
//! - **School**: [`school::SchoolInfo`] (rule-based extraction result) and
//!   [`school::RawSchoolBlock`] (raw page text handed to an external summarizer)
//! - **Calendar**: [`calendar::CalendarEvent`] grouped per person in
//!   [`calendar::PersonEvents`]
//! - **Weeks**: [`week::IsoWeek`] with Monday..Sunday expansion and
//!   next-week resolution
//! - **Errors**: [`errors::CoreError`] via `thiserror`
//! - **Text**: char-safe truncation and whitespace normalization in [`text`]
//! - **Logging**: [`logging::init_subscriber`] for the `tracing` stack
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other veckobrev crates.

#![deny(unsafe_code)]

pub mod calendar;
pub mod errors;
pub mod logging;
pub mod school;
pub mod text;
pub mod week;

pub use calendar::{CalendarEvent, EventsByPerson, PersonEvents};
pub use errors::{CoreError, Result};
pub use school::{RawSchoolBlock, SchoolInfo};
pub use week::IsoWeek;

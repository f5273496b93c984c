//! # veckobrev-extract
//!
//! Rule-based extraction of week-scoped highlights from school portal text.
//!
//! The pipeline runs per person:
//!
//! 1. [`segment`]: split text on the first occurrence of each subject header
//! 2. [`relevance`]: keep lines with keywords, week references or equipment
//!    reminders, minus boilerplate
//! 3. [`window`]: drop lines whose week numbers miss the target window
//! 4. [`context`]: fold follow-up lines into bare week-range lines
//! 5. [`dedup`]: remove whitespace-normalized repeats
//!
//! All vocabulary comes from [`ExtractionRules`], compiled once from
//! `veckobrev_settings::RuleSettings`.
//!
//! ## Crate Position
//!
//! Depends on: veckobrev-core, veckobrev-settings.
//! Depended on by: veckobrev (CLI).

#![deny(unsafe_code)]

pub mod context;
pub mod dedup;
pub mod errors;
pub mod page;
pub mod pipeline;
pub mod relevance;
pub mod rules;
pub mod segment;
pub mod window;

pub use errors::{ExtractError, Result};
pub use page::{extract_page_week, html_to_text};
pub use pipeline::{PageSource, extract_highlights, parse_page_text, school_info_from_fetch};
pub use rules::ExtractionRules;

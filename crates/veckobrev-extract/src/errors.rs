//! Extraction error types.

use thiserror::Error;

/// Errors raised while preparing the extraction rules.
///
/// Extraction itself never fails: a page that cannot be fetched is recorded
/// on its `SchoolInfo` instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A configured pattern is not a valid regex.
    #[error("invalid {name} pattern: {source}")]
    InvalidPattern {
        /// Which rule list the pattern came from.
        name: &'static str,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Result type for extraction setup.
pub type Result<T> = std::result::Result<T, ExtractError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Core error types.

use thiserror::Error;

/// Errors raised by foundation helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The (year, week) pair does not name an ISO week.
    #[error("invalid ISO week {week} for year {year}")]
    InvalidWeek {
        /// ISO year.
        year: i32,
        /// ISO week number.
        week: u32,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_week_display() {
        let err = CoreError::InvalidWeek {
            year: 2025,
            week: 54,
        };
        assert_eq!(err.to_string(), "invalid ISO week 54 for year 2025");
    }
}

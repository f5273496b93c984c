//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

/// Why settings could not be loaded.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not JSON, or the merged document does not fit the
    /// settings shape.
    #[error("malformed settings{}: {source}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Json {
        /// Settings file, when the failure came from reading one.
        path: Option<PathBuf>,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A value passed parsing but breaks a cross-field constraint.
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_names_the_file() {
        let err = SettingsError::Io {
            path: PathBuf::from("/home/u/.veckobrev/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "cannot read /home/u/.veckobrev/settings.json: denied"
        );
    }

    #[test]
    fn json_with_and_without_path() {
        let parse = || serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let with = SettingsError::Json {
            path: Some(PathBuf::from("s.json")),
            source: parse(),
        };
        assert!(with.to_string().starts_with("malformed settings in s.json: "));

        let without = SettingsError::Json {
            path: None,
            source: parse(),
        };
        assert!(without.to_string().starts_with("malformed settings: "));
    }
}

//! Structured logging with `tracing`.
//!
//! Library crates only emit `tracing` events with structured fields. The
//! binary installs the subscriber once at startup.

/// Crates whose events `--verbose` raises to `debug`.
const VECKOBREV_TARGETS: [&str; 6] = [
    "veckobrev",
    "veckobrev_core",
    "veckobrev_settings",
    "veckobrev_extract",
    "veckobrev_snapshot",
    "veckobrev_digest",
];

/// Filter directive used when `RUST_LOG` is unset.
///
/// Everything logs at `warn`. Verbose runs show `debug` for this program's
/// own crates only, so HTML parser internals stay quiet.
pub fn default_directive(verbose: bool) -> String {
    if !verbose {
        return "warn".to_owned();
    }
    let mut directive = String::from("warn");
    for target in VECKOBREV_TARGETS {
        directive.push(',');
        directive.push_str(target);
        directive.push_str("=debug");
    }
    directive
}

/// Install the global stderr subscriber.
///
/// `RUST_LOG` takes precedence over [`default_directive`]. Returns `false`
/// when a subscriber was already installed.
pub fn init_subscriber(verbose: bool) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_by_default() {
        assert_eq!(default_directive(false), "warn");
    }

    #[test]
    fn verbose_raises_own_crates_only() {
        let directive = default_directive(true);
        assert!(directive.starts_with("warn,"));
        assert!(directive.contains("veckobrev_extract=debug"));
        assert!(directive.contains("veckobrev_snapshot=debug"));
        assert!(!directive.contains("scraper"));
        // every piece must parse as a directive
        let _ = tracing_subscriber::EnvFilter::try_new(&directive).unwrap();
    }

    #[test]
    fn second_init_is_refused() {
        let _ = init_subscriber(false);
        assert!(!init_subscriber(true));
    }
}

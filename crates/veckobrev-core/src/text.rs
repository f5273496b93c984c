//! Character-safe string helpers.
//!
//! Portal text is Swedish, so byte slicing would split `å`, `ä` and `ö`.
//! Limits in this crate are counted in `char`s, never bytes.

/// Number of `char`s in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_chars` characters, e.g. `"läxa"` at 2
/// is `"lä"`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate `s` and append `suffix` if the original exceeds `max_chars`.
///
/// The returned string is at most `max_chars` characters long (including the
/// suffix). If the string fits, it is returned unchanged.
pub fn truncate_with_suffix(s: &str, max_chars: usize, suffix: &str) -> String {
    if char_len(s) <= max_chars {
        return s.to_owned();
    }
    let body_budget = max_chars.saturating_sub(char_len(suffix));
    let prefix = truncate_chars(s, body_budget);
    format!("{}{suffix}", prefix.trim_end())
}

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_chars ───────────────────────────────────────────────────

    #[test]
    fn ascii_within_limit() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn ascii_exact_limit() {
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn ascii_truncated() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn empty_string() {
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn zero_max() {
        assert_eq!(truncate_chars("hello", 0), "");
    }

    #[test]
    fn swedish_letters_count_as_one() {
        // 'ö' and 'ä' are 2 bytes each
        assert_eq!(truncate_chars("förhör", 3), "för");
        assert_eq!(truncate_chars("hälsa", 2), "hä");
        assert_eq!(truncate_chars("läxa", 2), "lä");
    }

    // ── truncate_with_suffix ─────────────────────────────────────────────

    #[test]
    fn suffix_fits() {
        assert_eq!(truncate_with_suffix("hello", 10, "…"), "hello");
    }

    #[test]
    fn suffix_truncates() {
        assert_eq!(truncate_with_suffix("hello world", 6, "…"), "hello…");
    }

    #[test]
    fn suffix_counts_in_budget() {
        let out = truncate_with_suffix(&"å".repeat(300), 220, "…");
        assert_eq!(char_len(&out), 220);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn suffix_exact_fit() {
        assert_eq!(truncate_with_suffix("abc", 3, "…"), "abc");
    }

    // ── collapse_whitespace ──────────────────────────────────────────────

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn collapse_empty() {
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}

//! Order-preserving highlight deduplication.

use std::collections::HashSet;

use veckobrev_core::text::collapse_whitespace;

/// Drop lines whose whitespace-normalized form was already seen.
///
/// The first occurrence is kept as emitted; relative order is preserved.
pub fn dedup(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(lines.len());
    lines
        .into_iter()
        .filter(|line| seen.insert(collapse_whitespace(line)))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn whitespace_variants_collapse() {
        let lines = owned(&["**NO:**  prov  v.6", "**SO:** läxa", "**NO:** prov v.6 "]);
        assert_eq!(dedup(lines), owned(&["**NO:**  prov  v.6", "**SO:** läxa"]));
    }

    #[test]
    fn case_is_significant() {
        let lines = owned(&["**NO:** Prov", "**NO:** prov"]);
        assert_eq!(dedup(lines).len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(dedup(Vec::new()).is_empty());
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn idempotent(lines in prop::collection::vec("[a-c ]{0,6}", 0..20)) {
                let once = dedup(lines);
                let twice = dedup(once.clone());
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn keeps_order_of_first_occurrences(lines in prop::collection::vec("[a-c]{1,3}", 0..20)) {
                let out = dedup(lines.clone());
                let firsts: Vec<String> = lines
                    .iter()
                    .enumerate()
                    .filter(|(i, l)| !lines[..*i].contains(l))
                    .map(|(_, l)| l.clone())
                    .collect();
                prop_assert_eq!(out, firsts);
            }
        }
    }
}

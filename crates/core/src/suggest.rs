//! Suggestion computation over the source pool.
//!
//! The engine is a pure filter: it walks the source pool in order, keeps the
//! candidates the matcher accepts, and drops anything already committed so a
//! value can never be offered twice. A trimmed-empty query always produces an
//! empty list (the panel never opens for blank input).
//!
//! When an external suggestion source is configured on the controller this
//! module is bypassed entirely and the externally supplied list is used
//! as-is; the already-committed exclusion is NOT enforced for such sources
//! and remains the caller's responsibility.

use std::fmt;

/// Matcher signature: does `candidate` match the raw query text? The
/// lifetime admits borrowing closures, not only `'static` ones.
pub type MatchFn<'m, T> = dyn Fn(&str, &T) -> bool + 'm;

/// Default matcher: case-insensitive substring containment of the trimmed
/// query inside the candidate's trimmed display string.
pub fn default_matcher<T: fmt::Display>(query: &str, candidate: &T) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    candidate.to_string().trim().to_lowercase().contains(&needle)
}

/// Stateless suggestion filter over a source pool.
pub struct SuggestionEngine;

impl SuggestionEngine {
    /// Filter `source` by `matcher`, excluding values already in `committed`.
    ///
    /// Output preserves source order. Returns empty immediately when the
    /// trimmed query is empty, regardless of what the matcher would accept.
    pub fn compute<T>(query: &str, source: &[T], committed: &[T], matcher: &MatchFn<'_, T>) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        if query.trim().is_empty() {
            return Vec::new();
        }
        source
            .iter()
            .filter(|candidate| matcher(query, candidate) && !committed.contains(candidate))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<String> {
        ["Android", "iOS", "Linux", "FreeBSD"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn matches_case_insensitive_substring() {
        let out = SuggestionEngine::compute("and", &pool(), &[], &default_matcher);
        assert_eq!(out, ["Android"]);
        let out = SuggestionEngine::compute("OS", &pool(), &[], &default_matcher);
        assert_eq!(out, ["iOS"]);
    }

    #[test]
    fn excludes_committed_values() {
        let committed = vec!["Android".to_string()];
        let out = SuggestionEngine::compute("and", &pool(), &committed, &default_matcher);
        assert!(out.is_empty());
    }

    #[test]
    fn preserves_source_order() {
        let out = SuggestionEngine::compute("i", &pool(), &[], &default_matcher);
        assert_eq!(out, ["Android", "iOS", "Linux"]);
    }

    #[test]
    fn trimmed_empty_query_yields_nothing() {
        let accept_all = |_: &str, _: &String| true;
        assert!(SuggestionEngine::compute("", &pool(), &[], &accept_all).is_empty());
        assert!(SuggestionEngine::compute("   ", &pool(), &[], &accept_all).is_empty());
    }

    #[test]
    fn query_whitespace_is_trimmed_by_default_matcher() {
        let out = SuggestionEngine::compute(" ios ", &pool(), &[], &default_matcher);
        assert_eq!(out, ["iOS"]);
    }

    #[test]
    fn matcher_may_borrow_local_state() {
        let allowed = ["iOS".to_string()];
        let from_allowlist = |_: &str, c: &String| allowed.contains(c);
        let out = SuggestionEngine::compute("anything", &pool(), &[], &from_allowlist);
        assert_eq!(out, ["iOS"]);
    }

    #[test]
    fn custom_matcher_replaces_filtering() {
        let prefix_only = |q: &str, c: &String| c.starts_with(q);
        let out = SuggestionEngine::compute("F", &pool(), &[], &prefix_only);
        assert_eq!(out, ["FreeBSD"]);
    }
}

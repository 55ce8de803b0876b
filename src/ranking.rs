//! Relevance scoring for the local fallback path.
//!
//! Pure functions, no state, no I/O. Title matches and prefix matches
//! dominate; there is no token-level or fuzzy matching here, since typo
//! tolerance is a capability of the external index only.

use crate::types::SearchResult;
use std::cmp::Ordering;

/// Normalize a raw query for local matching: trim + lowercase.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Score a candidate against a normalized query.
///
/// `score = 3 × occurrences(q, title) + occurrences(q, description)
///        + 5 if title starts with q`
///
/// Occurrence counting is non-overlapping. Candidate text is lowercased
/// here; the query must already be normalized via [`normalize_query`].
pub fn relevance_score(title: &str, description: &str, query: &str) -> u32 {
    if query.is_empty() {
        return 0;
    }
    let title = title.to_lowercase();
    let description = description.to_lowercase();

    let mut score = 3 * count_occurrences(&title, query) + count_occurrences(&description, query);
    if title.starts_with(query) {
        score += 5;
    }
    score
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    haystack.matches(needle).count() as u32
}

/// Descending ranking order for fallback candidates: score first, then the
/// fixed kind-priority table breaks ties.
pub fn compare_ranked(a: &SearchResult, b: &SearchResult) -> Ordering {
    let score_a = a.relevance.unwrap_or(0);
    let score_b = b.relevance.unwrap_or(0);
    score_b
        .cmp(&score_a)
        .then_with(|| b.kind.priority().cmp(&a.kind.priority()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultKind;
    use assert2::check;
    use rstest::rstest;

    fn candidate(kind: ResultKind, relevance: u32) -> SearchResult {
        SearchResult {
            id: "x".into(),
            title: String::new(),
            description: String::new(),
            url: "/x".into(),
            kind,
            category: None,
            snippet: None,
            relevance: Some(relevance),
        }
    }

    #[rstest]
    // one title hit, no prefix
    #[case("Zwanski Academy - Free Education", "", "academy", 3)]
    // prefix bonus on top of the title hit
    #[case("Academy overview", "", "academy", 8)]
    // description hits count once each
    #[case("Services", "web development and web design", "web", 2)]
    // title + description combined
    #[case("Web Development", "custom web apps", "web", 9)]
    // no match
    #[case("Contact", "get in touch", "jobs", 0)]
    // non-overlapping counting
    #[case("aaaa", "", "aa", 11)]
    fn scoring_formula(
        #[case] title: &str,
        #[case] description: &str,
        #[case] query: &str,
        #[case] expected: u32,
    ) {
        check!(relevance_score(title, description, query) == expected);
    }

    #[test]
    fn empty_query_scores_zero() {
        check!(relevance_score("anything", "anything", "") == 0);
    }

    #[test]
    fn prefix_match_ranks_before_plain_contains() {
        // Both contain the query once in the title; only one starts with it.
        let prefix = relevance_score("academy courses", "", "academy");
        let contains = relevance_score("zwanski academy", "", "academy");
        check!(prefix > contains);
    }

    #[test]
    fn ties_break_by_kind_priority() {
        let page = candidate(ResultKind::Page, 4);
        let job = candidate(ResultKind::Job, 4);
        check!(compare_ranked(&page, &job) == std::cmp::Ordering::Less);

        let mut list = vec![job.clone(), page.clone()];
        list.sort_by(compare_ranked);
        check!(list[0].kind == ResultKind::Page);
    }

    #[test]
    fn higher_score_wins_regardless_of_kind() {
        let job = candidate(ResultKind::Job, 9);
        let page = candidate(ResultKind::Page, 4);
        let mut list = vec![page, job];
        list.sort_by(compare_ranked);
        check!(list[0].kind == ResultKind::Job);
    }

    #[rstest]
    #[case("  Academy  ", "academy")]
    #[case("IMEI Check", "imei check")]
    #[case("", "")]
    fn query_normalization(#[case] raw: &str, #[case] expected: &str) {
        check!(normalize_query(raw) == expected);
    }
}

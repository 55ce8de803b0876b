//! Query suggestions derived from a fixed vocabulary of common search terms.
//!
//! Used on every search path; in external-index mode the service's own
//! suggestion list replaces this one when it comes back non-empty.

use rapidfuzz::distance::jaro_winkler;

/// Suggestion requests are only issued for queries of at least this length.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Common search terms observed on the site. Order is a rough popularity
/// prior; ties in similarity keep it stable.
const VOCABULARY: &[&str] = &[
    "web development",
    "it support",
    "device repair",
    "imei check",
    "jobs",
    "freelance jobs",
    "hire freelancers",
    "courses",
    "free courses",
    "academy",
    "programming tutorials",
    "blog",
    "security",
    "seo optimization",
    "mobile apps",
    "wordpress",
    "react",
    "contact",
    "services",
    "live chat",
];

/// Vocabulary terms containing the normalized query as a substring,
/// excluding an exact match, ordered by similarity to the query, capped.
///
/// Returns an empty list for queries shorter than
/// [`MIN_SUGGESTION_QUERY_LEN`].
pub fn suggestions_for(query: &str, limit: usize) -> Vec<String> {
    if query.len() < MIN_SUGGESTION_QUERY_LEN {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = VOCABULARY
        .iter()
        .filter(|term| term.contains(query) && **term != query)
        .map(|term| (jaro_winkler::similarity(query.chars(), term.chars()), *term))
        .collect();

    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, term)| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("a")]
    fn short_queries_yield_nothing(#[case] query: &str) {
        check!(suggestions_for(query, 5).is_empty());
    }

    #[test]
    fn substring_filter_applies() {
        let suggestions = suggestions_for("cour", 5);
        check!(suggestions.contains(&"courses".to_string()));
        check!(suggestions.contains(&"free courses".to_string()));
        check!(suggestions.iter().all(|s| s.contains("cour")));
    }

    #[test]
    fn exact_query_is_excluded() {
        let suggestions = suggestions_for("jobs", 5);
        check!(!suggestions.contains(&"jobs".to_string()));
        check!(suggestions.contains(&"freelance jobs".to_string()));
    }

    #[test]
    fn capped_at_limit() {
        // "re" appears in many vocabulary terms.
        check!(suggestions_for("re", 3).len() <= 3);
    }

    #[test]
    fn closest_term_sorts_first() {
        let suggestions = suggestions_for("course", 5);
        check!(suggestions.first().map(String::as_str) == Some("courses"));
    }
}

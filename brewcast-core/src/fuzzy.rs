//! Subsequence matching used to narrow the state and city prompts.
//!
//! A candidate matches when every character of the query appears in it, in
//! order, ignoring case. Consecutive runs of matched characters score higher,
//! so "rich" ranks "Richmond" ahead of "North Chesterfield".

/// Score `candidate` against `query`, or `None` if it is not a subsequence match.
///
/// An empty query matches everything with a score of zero.
pub fn score(query: &str, candidate: &str) -> Option<i64> {
    let pattern: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if pattern.is_empty() {
        return Some(0);
    }

    let mut next = 0;
    let mut run = 0i64;
    let mut total = 0i64;

    for c in candidate.chars().flat_map(char::to_lowercase) {
        if next < pattern.len() && c == pattern[next] {
            run = 1 + 2 * run;
            next += 1;
        } else {
            run = 0;
        }
        total += run;
    }

    (next == pattern.len()).then_some(total)
}

/// Candidates matching `query`, best match first; ties keep their original order.
pub fn filter_candidates<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<String> {
    let mut scored: Vec<(i64, &str)> = candidates
        .iter()
        .filter_map(|c| score(query, c.as_ref()).map(|s| (s, c.as_ref())))
        .collect();

    // stable: equal scores stay in input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, c)| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &[&str] = &["Chesapeake", "North Chesterfield", "Richmond", "Roanoke", "Rich Creek"];

    #[test]
    fn empty_query_keeps_everything_in_order() {
        assert_eq!(filter_candidates("", CITIES), CITIES);
    }

    #[test]
    fn empty_candidate_list_is_fine() {
        let none: &[&str] = &[];
        assert!(filter_candidates("abc", none).is_empty());
        assert!(filter_candidates("", none).is_empty());
    }

    #[test]
    fn matches_non_contiguous_subsequence_ignoring_case() {
        let found = filter_candidates("RMD", CITIES);
        assert_eq!(found, vec!["Richmond"]);
        assert!(score("nchf", "North Chesterfield").is_some());
        assert!(score("dnomhcir", "Richmond").is_none());
    }

    #[test]
    fn exact_candidate_is_always_included() {
        for city in CITIES {
            assert!(filter_candidates(city, CITIES).iter().any(|c| c == city));
        }
    }

    #[test]
    fn contiguous_matches_rank_first() {
        let found = filter_candidates("rich", CITIES);
        assert_eq!(found[0], "Richmond");
        assert!(found.contains(&"Rich Creek".to_string()));
        assert!(!found.contains(&"Roanoke".to_string()));
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let names = ["Bbb", "Abb", "Cbb"];
        assert_eq!(filter_candidates("bb", &names), vec!["Bbb", "Abb", "Cbb"]);
    }
}

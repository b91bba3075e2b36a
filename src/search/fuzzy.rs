//! Fuzzy query-token expansion against the index vocabulary.
//!
//! Each query token is expanded into a small set of vocabulary tokens within
//! a Levenshtein edit-distance budget. Exact matches keep full weight; near
//! matches contribute at a discount, so typos still retrieve the documents
//! the corrected token would.

use rapidfuzz::distance::levenshtein;

use super::index::SearchIndex;

/// An expanded query-token candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// A vocabulary token (or the literal query token when unseen).
    pub token: String,
    /// Edit distance from the original query token.
    pub distance: usize,
    /// Score multiplier derived from the distance.
    pub weight: f32,
}

impl Candidate {
    fn exact(token: &str) -> Self {
        Self {
            token: token.to_string(),
            distance: 0,
            weight: 1.0,
        }
    }
}

/// Maps edit distance to a match weight.
const fn match_weight(distance: usize) -> f32 {
    match distance {
        0 => 1.0,
        1 => 0.6,
        _ => 0.3,
    }
}

/// The candidate set used when fuzzy matching is disabled: the literal query
/// token at full weight.
pub fn literal(query_token: &str) -> Vec<Candidate> {
    vec![Candidate::exact(query_token)]
}

/// Expand `query_token` against the index vocabulary.
///
/// Scans every distinct vocabulary token, keeping those within `max_edits`
/// (uniform-cost insert/delete/substitute). Candidates are ordered by
/// ascending distance, ties broken by descending document frequency (common
/// terms preferred), then by token for determinism, and truncated to
/// `max_candidates`.
///
/// If the vocabulary contains no exact match, the literal query token is
/// synthesized at distance 0 so an exact-but-unseen token still participates
/// (it matches no document and contributes zero score).
pub fn expand(
    query_token: &str,
    index: &SearchIndex,
    max_edits: usize,
    max_candidates: usize,
) -> Vec<Candidate> {
    let args = levenshtein::Args::default().score_cutoff(max_edits);

    let mut candidates = Vec::new();
    let mut has_exact = false;

    for term in index.vocabulary() {
        if let Some(distance) =
            levenshtein::distance_with_args(query_token.chars(), term.chars(), &args)
        {
            has_exact |= distance == 0;
            candidates.push(Candidate {
                token: term.to_string(),
                distance,
                weight: match_weight(distance),
            });
        }
    }

    if !has_exact {
        candidates.push(Candidate::exact(query_token));
    }

    candidates.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| index.doc_freq(&b.token).cmp(&index.doc_freq(&a.token)))
            .then_with(|| a.token.cmp(&b.token))
    });
    candidates.truncate(max_candidates.max(1));

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocRecord, Record};
    use assert2::check;
    use rstest::rstest;

    fn index_with_titles(titles: &[&str]) -> SearchIndex {
        let records = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                Record::Doc(DocRecord {
                    id: format!("doc:{i}"),
                    title: (*title).to_string(),
                    ..DocRecord::default()
                })
            })
            .collect();
        SearchIndex::build(records)
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let index = index_with_titles(&["refund", "refunds", "rebind"]);
        let candidates = expand("refund", &index, 1, 3);
        check!(candidates[0].token == "refund");
        check!(candidates[0].distance == 0);
        check!(candidates[0].weight == 1.0);
    }

    #[test]
    fn test_typo_within_budget() {
        let index = index_with_titles(&["refund"]);
        let candidates = expand("refnud", &index, 2, 3);
        check!(candidates.iter().any(|c| c.token == "refund"));
    }

    #[test]
    fn test_unseen_token_synthesized() {
        let index = index_with_titles(&["payment"]);
        let candidates = expand("zzzzzz", &index, 1, 3);
        check!(candidates == vec![Candidate::exact("zzzzzz")]);
    }

    #[test]
    fn test_ties_prefer_common_terms() {
        // "orders" and "border" are both distance 1 from "order"; the one
        // present in more documents sorts first.
        let index = index_with_titles(&["order", "orders", "orders", "border"]);
        let candidates = expand("order", &index, 1, 3);
        check!(candidates[0].token == "order");
        check!(candidates[1].token == "orders");
        check!(candidates[2].token == "border");
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn test_max_edits_budget(#[case] max_edits: usize) {
        let index = index_with_titles(&["refund", "refined"]);
        let candidates = expand("refund", &index, max_edits, 5);
        check!(candidates.iter().all(|c| c.distance <= max_edits));
    }

    #[test]
    fn test_truncates_to_max_candidates() {
        let index = index_with_titles(&["cat", "bat", "hat", "rat", "mat"]);
        let candidates = expand("cat", &index, 1, 2);
        check!(candidates.len() == 2);
    }

    #[test]
    fn test_literal_when_fuzzy_disabled() {
        check!(literal("refund") == vec![Candidate::exact("refund")]);
    }
}

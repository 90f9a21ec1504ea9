//! Keyword tokenization and relevance ranking.
//!
//! Queries and submitted keyword strings share one tokenizer: split on `,`
//! and `.`, trim, drop empties, lowercase. A candidate's score is the size
//! of the set intersection between its keywords and the query tokens, so
//! duplicate keywords never inflate relevance. Ties are broken by ascending
//! id, which keeps the ordering deterministic across runs.

use common::model::template::Template;
use std::collections::HashSet;

/// Splits a raw keyword or query string into normalized tokens, preserving
/// order.
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.split([',', '.'])
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Ranks `candidates` against `query`, returning ids ordered by descending
/// score, then ascending id. Candidates matching no token are dropped.
pub fn rank(candidates: &[Template], query: &str) -> Vec<i64> {
    let tokens: HashSet<String> = tokenize(query).into_iter().collect();

    let mut scored: Vec<(usize, i64)> = candidates
        .iter()
        .filter_map(|template| {
            let key_words: HashSet<&str> =
                template.key_words.iter().map(String::as_str).collect();
            let score = key_words
                .iter()
                .filter(|word| tokens.contains(**word))
                .count();
            (score > 0).then_some((score, template.id))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, id)| id).collect()
}

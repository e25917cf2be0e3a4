//! # Similarity Module
//!
//! This module defines the string similarity primitive the normalizer is built
//! on. Scores are in the range 0-100, higher meaning more similar, and must be
//! deterministic for identical inputs.
//!
//! The engine only depends on the [`SimilarityScorer`] trait, so a different
//! backend (or a fixed-score mock in tests) can be swapped in.

use std::collections::BTreeSet;

use log::trace;
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::text_processing::tokenize;

pub const MAX_SCORE: f64 = 100.0;

/// One result of a top-N extraction
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMatch {
    /// The matched choice
    pub choice: String,
    /// Similarity to the query (0-100)
    pub score: f64,
    /// Position of the choice in the input slice
    pub index: usize,
}

/// A pluggable similarity backend
pub trait SimilarityScorer: Send + Sync {
    /// Similarity between `a` and `b`, in 0-100
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// The `limit` choices most similar to `query`, best first
    ///
    /// Equal scores keep the order of `choices`.
    fn extract(&self, query: &str, choices: &[&str], limit: usize) -> Vec<ExtractedMatch> {
        let mut scored: Vec<ExtractedMatch> = choices
            .iter()
            .enumerate()
            .map(|(index, choice)| ExtractedMatch {
                choice: choice.to_string(),
                score: self.similarity(query, choice),
                index,
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        scored
    }

    /// The single choice most similar to `query`
    fn extract_one(&self, query: &str, choices: &[&str]) -> Option<ExtractedMatch> {
        self.extract(query, choices, 1).into_iter().next()
    }
}

/// Scoring strategy for [`StrsimScorer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorerKind {
    /// Normalized Levenshtein similarity over the whole strings
    ///
    /// Distance is divided by the longer length, not by the total length as in
    /// an Indel ratio, so scores run lower: "tomaeto" vs "tomato" is 85.7, not 92.3.
    Ratio,
    /// Order-insensitive comparison of the shared and differing token sets
    #[default]
    TokenSetRatio,
    /// Jaro-Winkler similarity, favoring shared prefixes
    JaroWinkler,
}

/// Similarity backend built on the `strsim` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct StrsimScorer {
    kind: ScorerKind,
}

impl StrsimScorer {
    pub fn new(kind: ScorerKind) -> Self {
        Self { kind }
    }
}

impl SimilarityScorer for StrsimScorer {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let score = match self.kind {
            ScorerKind::Ratio => ratio(a, b),
            ScorerKind::TokenSetRatio => token_set_ratio(a, b),
            ScorerKind::JaroWinkler => {
                if a.is_empty() || b.is_empty() {
                    0.0
                } else {
                    jaro_winkler(a, b) * MAX_SCORE
                }
            }
        };
        trace!("similarity({:?}) '{}' ~ '{}' = {:.2}", self.kind, a, b, score);
        score
    }
}

/// Normalized Levenshtein similarity scaled to 0-100; an empty side scores 0
///
/// `1 - distance / max_len`, with a substitution counted as a single edit.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * MAX_SCORE
}

/// Token-set similarity scaled to 0-100
///
/// Both strings are split on whitespace and hyphens (the same boundaries as
/// [`tokenize`]) into sorted, de-duplicated token sets.
/// The shared tokens are compared against each side's "shared + own" string,
/// and both of those against each other; the best of the three ratios wins.
/// A string whose tokens are a subset of the other's scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<String> = tokenize(a).into_iter().collect();
    let tokens_b: BTreeSet<String> = tokenize(b).into_iter().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let shared = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = join_nonempty(&shared, &only_a);
    let combined_b = join_nonempty(&shared, &only_b);

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join<'a, I: Iterator<Item = &'a String>>(tokens: I) -> String {
    tokens.map(String::as_str).collect::<Vec<&str>>().join(" ")
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}

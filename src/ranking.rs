//! # Ranking Module
//!
//! This module turns raw similarity scores into the final candidate ordering.
//!
//! ## Scoring
//!
//! ```text
//! combined = raw * 0.8 + category_priority * 2.0
//! combined *= 0.6   when every token of the entry is a modifier token
//! ```
//!
//! Candidates are sorted by combined score, best first. The sort is stable,
//! so equal scores keep the order the candidate generator produced them in.

use log::trace;

use crate::normalizer_config::{CategoryPriorities, ModifierTokens};
use crate::text_processing::tokenize;
use crate::vocabulary::Vocabulary;

pub const SIMILARITY_WEIGHT: f64 = 0.8;
pub const CATEGORY_WEIGHT: f64 = 2.0;
pub const MODIFIER_PENALTY: f64 = 0.6;

/// A scored match before re-ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub raw_score: f64,
}

impl Candidate {
    pub fn new(name: &str, raw_score: f64) -> Self {
        Self {
            name: name.to_string(),
            raw_score,
        }
    }
}

/// A candidate after category weighting and modifier penalties
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Canonical vocabulary name
    pub name: String,
    /// Combined score; higher is better
    pub score: f64,
}

impl From<RankedCandidate> for (String, f64) {
    fn from(candidate: RankedCandidate) -> Self {
        (candidate.name, candidate.score)
    }
}

/// Combines raw similarity with category priors
pub struct Ranker<'a> {
    vocabulary: &'a Vocabulary,
    priorities: &'a CategoryPriorities,
    modifiers: &'a ModifierTokens,
}

impl<'a> Ranker<'a> {
    pub fn new(
        vocabulary: &'a Vocabulary,
        priorities: &'a CategoryPriorities,
        modifiers: &'a ModifierTokens,
    ) -> Self {
        Self {
            vocabulary,
            priorities,
            modifiers,
        }
    }

    /// Priority of the entry's category; names outside the vocabulary get the default
    pub fn category_priority(&self, name: &str) -> i32 {
        match self.vocabulary.category(name) {
            Some(category) => self.priorities.priority(category),
            None => self.priorities.default_weight(),
        }
    }

    /// The part of a combined score contributed by the category
    pub fn category_boost(&self, name: &str) -> f64 {
        f64::from(self.category_priority(name)) * CATEGORY_WEIGHT
    }

    /// True when the entry has tokens and all of them are modifier tokens
    pub fn is_modifier_only(&self, name: &str) -> bool {
        match self.vocabulary.tokens(name) {
            Some(tokens) => self.modifiers.covers_all(tokens),
            None => self.modifiers.covers_all(&tokenize(name)),
        }
    }

    pub fn combined_score(&self, candidate: &Candidate) -> f64 {
        let mut combined =
            candidate.raw_score * SIMILARITY_WEIGHT + self.category_boost(&candidate.name);
        if self.is_modifier_only(&candidate.name) {
            combined *= MODIFIER_PENALTY;
        }
        combined
    }

    /// Score and order candidates, best first
    pub fn rank(&self, candidates: Vec<Candidate>) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let score = self.combined_score(&candidate);
                trace!(
                    "Ranked '{}': raw={:.2} combined={:.2}",
                    candidate.name,
                    candidate.raw_score,
                    score
                );
                RankedCandidate {
                    name: candidate.name,
                    score,
                }
            })
            .collect();

        // `sort_by` is stable: equal scores keep generator order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Whether a ranked candidate clears `cutoff` once its category boost is removed
    pub fn passes_cutoff(&self, candidate: &RankedCandidate, cutoff: f64) -> bool {
        candidate.score - self.category_boost(&candidate.name) >= cutoff
    }
}

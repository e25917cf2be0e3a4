//! # Candidate Generator Module
//!
//! This module produces the ranked candidates for one canonical query by trying
//! three strategies in order and stopping at the first that yields a usable set:
//!
//! 1. **Exact**: the query is a vocabulary name. Returns it alone with score 100.
//! 2. **Token head**: entries sharing the query's head token (its only token,
//!    or its longest) are scored against the whole query, ranked, and kept if
//!    they clear a relaxed cutoff (`cutoff * 0.6`).
//! 3. **Fuzzy**: the `top_k` most similar entries overall are ranked and kept
//!    if they clear the full cutoff. When none do, the best `top_k` ranked
//!    entries are returned anyway so a non-empty query always gets an answer.
//!
//! Cutoffs are compared against the combined score with the category boost
//! taken back out, so category priors reorder candidates without letting a
//! weak match through.

use log::debug;

use crate::ranking::{Candidate, RankedCandidate, Ranker};
use crate::similarity::{SimilarityScorer, MAX_SCORE};
use crate::text_processing::{head_token, tokenize};
use crate::vocabulary::Vocabulary;

/// Score reported for an exact vocabulary hit
pub const EXACT_MATCH_SCORE: f64 = MAX_SCORE;
/// Fraction of the cutoff a token-head candidate must clear
pub const TOKEN_HEAD_CUTOFF_FACTOR: f64 = 0.6;

/// Which strategy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// The canonical query is a vocabulary name
    Exact,
    /// Entries sharing the query's head token
    TokenHead,
    /// Fuzzy candidates that cleared the cutoff
    Fuzzy,
    /// Fuzzy candidates returned although none cleared the cutoff
    FuzzyBestEffort,
    /// Nothing to return
    NoMatch,
}

/// Ranked candidates together with the tier that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub tier: MatchTier,
    pub candidates: Vec<RankedCandidate>,
}

impl MatchOutcome {
    fn new(tier: MatchTier, candidates: Vec<RankedCandidate>) -> Self {
        Self { tier, candidates }
    }

    fn no_match() -> Self {
        Self::new(MatchTier::NoMatch, Vec::new())
    }
}

/// Runs the exact / token-head / fuzzy tiers for a single query
pub struct CandidateGenerator<'a, S: SimilarityScorer + ?Sized> {
    vocabulary: &'a Vocabulary,
    scorer: &'a S,
    ranker: Ranker<'a>,
}

impl<'a, S: SimilarityScorer + ?Sized> CandidateGenerator<'a, S> {
    pub fn new(vocabulary: &'a Vocabulary, scorer: &'a S, ranker: Ranker<'a>) -> Self {
        Self {
            vocabulary,
            scorer,
            ranker,
        }
    }

    /// Generate ranked candidates for an already canonicalized query
    ///
    /// An empty query or a `top_k` of zero yields no candidates.
    pub fn generate(&self, canonical: &str, top_k: usize, score_cutoff: f64) -> MatchOutcome {
        if canonical.is_empty() || top_k == 0 {
            debug!("Nothing to match for '{}' (top_k={})", canonical, top_k);
            return MatchOutcome::no_match();
        }

        if let Some(outcome) = self.exact_match(canonical) {
            return outcome;
        }
        if let Some(outcome) = self.token_head_match(canonical, top_k, score_cutoff) {
            return outcome;
        }
        self.fuzzy_match(canonical, top_k, score_cutoff)
    }

    fn exact_match(&self, canonical: &str) -> Option<MatchOutcome> {
        if !self.vocabulary.contains(canonical) {
            return None;
        }
        debug!("Exact match for '{}'", canonical);
        Some(MatchOutcome::new(
            MatchTier::Exact,
            vec![RankedCandidate {
                name: canonical.to_string(),
                score: EXACT_MATCH_SCORE,
            }],
        ))
    }

    fn token_head_match(
        &self,
        canonical: &str,
        top_k: usize,
        score_cutoff: f64,
    ) -> Option<MatchOutcome> {
        let tokens = tokenize(canonical);
        let head = head_token(&tokens)?;

        let candidates: Vec<Candidate> = self
            .vocabulary
            .entries_with_token(head)
            .map(|entry| {
                Candidate::new(&entry.name, self.scorer.similarity(canonical, &entry.name))
            })
            .collect();
        if candidates.is_empty() {
            debug!("No vocabulary entry contains head token '{}'", head);
            return None;
        }

        let relaxed_cutoff = score_cutoff * TOKEN_HEAD_CUTOFF_FACTOR;
        let mut passing: Vec<RankedCandidate> = self
            .ranker
            .rank(candidates)
            .into_iter()
            .filter(|candidate| self.ranker.passes_cutoff(candidate, relaxed_cutoff))
            .collect();
        if passing.is_empty() {
            debug!(
                "Head token '{}' candidates all below cutoff {:.1}, falling through",
                head, relaxed_cutoff
            );
            return None;
        }

        passing.truncate(top_k);
        debug!(
            "Token head match for '{}' on '{}': {} candidates",
            canonical,
            head,
            passing.len()
        );
        Some(MatchOutcome::new(MatchTier::TokenHead, passing))
    }

    fn fuzzy_match(&self, canonical: &str, top_k: usize, score_cutoff: f64) -> MatchOutcome {
        let names: Vec<&str> = self.vocabulary.names().collect();
        let candidates: Vec<Candidate> = self
            .scorer
            .extract(canonical, &names, top_k)
            .into_iter()
            .map(|extracted| Candidate::new(&extracted.choice, extracted.score))
            .collect();

        let mut ranked = self.ranker.rank(candidates);
        if ranked.is_empty() {
            return MatchOutcome::no_match();
        }

        let mut passing: Vec<RankedCandidate> = ranked
            .iter()
            .filter(|candidate| self.ranker.passes_cutoff(candidate, score_cutoff))
            .cloned()
            .collect();
        if !passing.is_empty() {
            passing.truncate(top_k);
            debug!("Fuzzy match for '{}': {} candidates", canonical, passing.len());
            return MatchOutcome::new(MatchTier::Fuzzy, passing);
        }

        ranked.truncate(top_k);
        debug!(
            "No fuzzy candidate for '{}' cleared cutoff {:.1}, returning best {}",
            canonical,
            score_cutoff,
            ranked.len()
        );
        MatchOutcome::new(MatchTier::FuzzyBestEffort, ranked)
    }
}

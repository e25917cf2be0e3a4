//! # Ingredient Normalizer
//!
//! This module provides the public entry point: map free-form ingredient text
//! to ranked entries of a controlled vocabulary.
//!
//! The engine is read-only after construction. It owns its vocabulary, its
//! category priorities and its modifier tokens, so it can be shared across
//! threads (`&IngredientNormalizer` is `Sync`) without any locking.
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_normalizer::normalizer::IngredientNormalizer;
//!
//! let normalizer = IngredientNormalizer::with_defaults()?;
//!
//! assert_eq!(normalizer.best_match("  Tomato  "), Some("tomato".to_string()));
//! assert_eq!(normalizer.best_match("garlick"), Some("garlic".to_string()));
//! assert_eq!(normalizer.best_match("!!!"), None);
//! # Ok::<(), ingredient_normalizer::normalizer_errors::NormalizerError>(())
//! ```

use log::{debug, info};

use crate::candidate_generator::{CandidateGenerator, MatchOutcome};
use crate::normalizer_config::{NormalizerConfig, MIN_BEST_MATCH_TOP_K};
use crate::normalizer_errors::NormalizerError;
use crate::ranking::{RankedCandidate, Ranker};
use crate::similarity::{SimilarityScorer, StrsimScorer};
use crate::text_processing::canonicalize;
use crate::vocabulary::{builtin_rows, Vocabulary, VocabularyRow};

/// Maps user-typed ingredient names onto a controlled vocabulary
pub struct IngredientNormalizer<S: SimilarityScorer = StrsimScorer> {
    vocabulary: Vocabulary,
    config: NormalizerConfig,
    scorer: S,
}

impl IngredientNormalizer<StrsimScorer> {
    /// Create a normalizer with the default `strsim` token-set scorer
    pub fn new(vocabulary: Vocabulary, config: NormalizerConfig) -> Result<Self, NormalizerError> {
        Self::with_scorer(vocabulary, config, StrsimScorer::default())
    }

    /// Build the vocabulary from source rows, then create the normalizer
    pub fn from_rows<I>(rows: I, config: NormalizerConfig) -> Result<Self, NormalizerError>
    where
        I: IntoIterator<Item = VocabularyRow>,
    {
        Self::new(Vocabulary::from_rows(rows)?, config)
    }

    /// Normalizer over the built-in starter vocabulary with default settings
    pub fn with_defaults() -> Result<Self, NormalizerError> {
        Self::from_rows(builtin_rows(), NormalizerConfig::default())
    }
}

impl<S: SimilarityScorer> IngredientNormalizer<S> {
    /// Create a normalizer with a custom similarity backend
    pub fn with_scorer(
        vocabulary: Vocabulary,
        config: NormalizerConfig,
        scorer: S,
    ) -> Result<Self, NormalizerError> {
        config.validate()?;
        info!(
            "Creating IngredientNormalizer: {} entries, top_k={}, cutoff={}",
            vocabulary.len(),
            config.default_top_k,
            config.score_cutoff
        );
        Ok(Self {
            vocabulary,
            config,
            scorer,
        })
    }

    /// Ranked vocabulary matches for `text`, best first
    ///
    /// Never fails: empty or all-punctuation input yields an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingredient_normalizer::normalizer::IngredientNormalizer;
    ///
    /// let normalizer = IngredientNormalizer::with_defaults()?;
    /// let matches = normalizer.normalize("Chicken Breast", 3, 60.0);
    ///
    /// assert_eq!(matches[0].name, "chicken");
    /// # Ok::<(), ingredient_normalizer::normalizer_errors::NormalizerError>(())
    /// ```
    pub fn normalize(&self, text: &str, top_k: usize, score_cutoff: f64) -> Vec<RankedCandidate> {
        self.normalize_explained(text, top_k, score_cutoff).candidates
    }

    /// `normalize` with the configured `top_k` and cutoff
    pub fn normalize_default(&self, text: &str) -> Vec<RankedCandidate> {
        self.normalize(text, self.config.default_top_k, self.config.score_cutoff)
    }

    /// `normalize`, also reporting which matching tier produced the result
    pub fn normalize_explained(&self, text: &str, top_k: usize, score_cutoff: f64) -> MatchOutcome {
        let canonical = canonicalize(text);
        let outcome = self.generator().generate(&canonical, top_k, score_cutoff);
        debug!(
            "Normalized '{}' -> {:?} with {} candidates",
            text,
            outcome.tier,
            outcome.candidates.len()
        );
        outcome
    }

    /// Name of the single best match, or `None` when nothing matches
    pub fn best_match(&self, text: &str) -> Option<String> {
        let top_k = self.config.best_match_top_k.max(MIN_BEST_MATCH_TOP_K);
        self.normalize(text, top_k, self.config.score_cutoff)
            .into_iter()
            .next()
            .map(|candidate| candidate.name)
    }

    /// Best match, or the trimmed lowercase input when nothing matches
    pub fn normalize_or_input(&self, text: &str) -> String {
        self.best_match(text)
            .unwrap_or_else(|| text.trim().to_lowercase())
    }

    /// `normalize_or_input` over a list of inputs, preserving order
    pub fn normalize_list<T: AsRef<str>>(&self, texts: &[T]) -> Vec<String> {
        texts
            .iter()
            .map(|text| self.normalize_or_input(text.as_ref()))
            .collect()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn generator(&self) -> CandidateGenerator<'_, S> {
        let ranker = Ranker::new(
            &self.vocabulary,
            &self.config.category_priorities,
            &self.config.modifier_tokens,
        );
        CandidateGenerator::new(&self.vocabulary, &self.scorer, ranker)
    }
}

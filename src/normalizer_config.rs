//! # Normalizer Configuration Module
//!
//! This module defines the configuration for ingredient normalization:
//! query defaults, the category priority table and the modifier token set.
//! Every engine owns its own copy of these tables.

use std::collections::{HashMap, HashSet};
use std::env;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::normalizer_errors::NormalizerError;

// Constants for normalizer configuration
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_SCORE_CUTOFF: f64 = 60.0;
pub const MIN_BEST_MATCH_TOP_K: usize = 5;
pub const DEFAULT_CATEGORY_PRIORITY: i32 = 0;

pub const ENV_TOP_K: &str = "INGREDIENT_TOP_K";
pub const ENV_SCORE_CUTOFF: &str = "INGREDIENT_SCORE_CUTOFF";
pub const ENV_BEST_MATCH_TOP_K: &str = "INGREDIENT_BEST_MATCH_TOP_K";

const DEFAULT_PRIORITIES: &[(&str, i32)] = &[
    ("protein", 5),
    ("produce", 4),
    ("dairy", 3),
    ("grain", 3),
    ("legume", 3),
    ("fat", 2),
    ("baking", 2),
    ("herb", 2),
    ("spice", 1),
    ("condiment", 1),
    ("beverage", 1),
];

const DEFAULT_MODIFIERS: &[&str] = &[
    "sauce", "paste", "salt", "powder", "broth", "stock", "extract", "seasoning", "syrup",
    "dressing", "marinade", "glaze", "flakes", "zest",
];

/// Category tag -> priority weight, with a fallback for unknown or empty tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PrioritiesRepr", into = "PrioritiesRepr")]
pub struct CategoryPriorities {
    weights: HashMap<String, i32>,
    default_weight: i32,
}

impl CategoryPriorities {
    pub fn new(weights: HashMap<String, i32>, default_weight: i32) -> Self {
        let weights = weights
            .into_iter()
            .map(|(category, weight)| (category.trim().to_lowercase(), weight))
            .collect();
        Self {
            weights,
            default_weight,
        }
    }

    /// Priority of a category tag; unknown and empty tags get the default weight
    pub fn priority(&self, category: &str) -> i32 {
        self.weights
            .get(category)
            .copied()
            .unwrap_or(self.default_weight)
    }

    pub fn default_weight(&self) -> i32 {
        self.default_weight
    }
}

impl Default for CategoryPriorities {
    fn default() -> Self {
        let weights = DEFAULT_PRIORITIES
            .iter()
            .map(|(category, weight)| (category.to_string(), *weight))
            .collect();
        Self::new(weights, DEFAULT_CATEGORY_PRIORITY)
    }
}

/// Tokens marking a flavoring or modifier rather than a base ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ModifierTokens {
    tokens: HashSet<String>,
}

impl ModifierTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|token| token.as_ref().trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// True when `tokens` is non-empty and every token is a modifier
    pub fn covers_all(&self, tokens: &[String]) -> bool {
        !tokens.is_empty() && tokens.iter().all(|token| self.contains(token))
    }
}

impl Default for ModifierTokens {
    fn default() -> Self {
        Self::new(DEFAULT_MODIFIERS.iter())
    }
}

// Serialized shape of the priority table; keys are normalized on the way in
#[derive(Serialize, Deserialize)]
struct PrioritiesRepr {
    weights: HashMap<String, i32>,
    #[serde(default)]
    default_weight: i32,
}

impl From<PrioritiesRepr> for CategoryPriorities {
    fn from(repr: PrioritiesRepr) -> Self {
        Self::new(repr.weights, repr.default_weight)
    }
}

impl From<CategoryPriorities> for PrioritiesRepr {
    fn from(priorities: CategoryPriorities) -> Self {
        Self {
            weights: priorities.weights,
            default_weight: priorities.default_weight,
        }
    }
}

impl From<Vec<String>> for ModifierTokens {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl From<ModifierTokens> for Vec<String> {
    fn from(modifiers: ModifierTokens) -> Self {
        let mut tokens: Vec<String> = modifiers.tokens.into_iter().collect();
        tokens.sort();
        tokens
    }
}

/// Configuration structure for ingredient normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Number of candidates returned by `normalize_default`
    pub default_top_k: usize,
    /// Minimum similarity (0-100) a fuzzy candidate must clear
    pub score_cutoff: f64,
    /// Number of candidates considered by `best_match` (raised to at least 5)
    pub best_match_top_k: usize,
    /// Category priority table
    pub category_priorities: CategoryPriorities,
    /// Modifier token set
    pub modifier_tokens: ModifierTokens,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_top_k: DEFAULT_TOP_K,
            score_cutoff: DEFAULT_SCORE_CUTOFF,
            best_match_top_k: MIN_BEST_MATCH_TOP_K,
            category_priorities: CategoryPriorities::default(),
            modifier_tokens: ModifierTokens::default(),
        }
    }
}

impl NormalizerConfig {
    /// Parse a configuration from JSON; missing fields keep their defaults
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingredient_normalizer::normalizer_config::NormalizerConfig;
    ///
    /// let config = NormalizerConfig::from_json_str(r#"{ "score_cutoff": 75.0 }"#)?;
    /// assert_eq!(config.score_cutoff, 75.0);
    /// assert_eq!(config.default_top_k, 3);
    /// # Ok::<(), ingredient_normalizer::normalizer_errors::NormalizerError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, NormalizerError> {
        let config: NormalizerConfig = serde_json::from_str(json)
            .map_err(|e| NormalizerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from the environment (a `.env` file is honored)
    ///
    /// Reads `INGREDIENT_TOP_K`, `INGREDIENT_SCORE_CUTOFF` and
    /// `INGREDIENT_BEST_MATCH_TOP_K`; unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Some(top_k) = read_env_var::<usize>(ENV_TOP_K)? {
            config.default_top_k = top_k;
        }
        if let Some(cutoff) = read_env_var::<f64>(ENV_SCORE_CUTOFF)? {
            config.score_cutoff = cutoff;
        }
        if let Some(top_k) = read_env_var::<usize>(ENV_BEST_MATCH_TOP_K)? {
            config.best_match_top_k = top_k;
        }
        config.validate()?;

        info!(
            "Loaded normalizer config from environment: top_k={}, cutoff={}, best_match_top_k={}",
            config.default_top_k, config.score_cutoff, config.best_match_top_k
        );
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), NormalizerError> {
        if !self.score_cutoff.is_finite() || self.score_cutoff < 0.0 {
            return Err(NormalizerError::InvalidConfig(format!(
                "score_cutoff must be a non-negative number, got {}",
                self.score_cutoff
            )));
        }
        if self.best_match_top_k == 0 {
            return Err(NormalizerError::InvalidConfig(
                "best_match_top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_env_var<T>(key: &str) -> Result<Option<T>, NormalizerError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => {
            debug!("Read {}={}", key, raw);
            raw.trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| NormalizerError::InvalidConfig(format!("{key}: {e}")))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = NormalizerConfig::default();
        assert_eq!(config.default_top_k, 3);
        assert_eq!(config.score_cutoff, 60.0);
        assert_eq!(config.best_match_top_k, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_category_priorities_lookup() {
        let priorities = CategoryPriorities::default();
        assert_eq!(priorities.priority("protein"), 5);
        assert_eq!(priorities.priority("condiment"), 1);
        assert_eq!(priorities.priority(""), DEFAULT_CATEGORY_PRIORITY);
        assert_eq!(priorities.priority("unheard-of"), DEFAULT_CATEGORY_PRIORITY);
    }

    #[test]
    fn test_category_priorities_normalize_keys() {
        let mut weights = HashMap::new();
        weights.insert("  Protein ".to_string(), 9);
        let priorities = CategoryPriorities::new(weights, -1);
        assert_eq!(priorities.priority("protein"), 9);
        assert_eq!(priorities.priority("produce"), -1);
    }

    #[test]
    fn test_modifier_tokens_cover_all() {
        let modifiers = ModifierTokens::default();
        let soy_sauce = vec!["soy".to_string(), "sauce".to_string()];
        let chili_paste = vec!["paste".to_string()];
        assert!(!modifiers.covers_all(&soy_sauce));
        assert!(modifiers.covers_all(&chili_paste));
        assert!(!modifiers.covers_all(&[]));
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = NormalizerConfig::from_json_str(
            r#"{ "default_top_k": 7, "modifier_tokens": ["Sauce"] }"#,
        )
        .unwrap();
        assert_eq!(config.default_top_k, 7);
        assert_eq!(config.score_cutoff, DEFAULT_SCORE_CUTOFF);
        assert!(config.modifier_tokens.contains("sauce"));
        assert!(!config.modifier_tokens.contains("paste"));
    }

    #[test]
    fn test_from_json_category_priorities() {
        let config = NormalizerConfig::from_json_str(
            r#"{ "category_priorities": { "weights": { "Seafood": 6 }, "default_weight": 1 } }"#,
        )
        .unwrap();
        assert_eq!(config.category_priorities.priority("seafood"), 6);
        assert_eq!(config.category_priorities.priority("protein"), 1);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            NormalizerConfig::from_json_str(r#"{ "score_cutoff": -1.0 }"#),
            Err(NormalizerError::InvalidConfig(_))
        ));
        assert!(matches!(
            NormalizerConfig::from_json_str("not json"),
            Err(NormalizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_best_match_top_k() {
        let config = NormalizerConfig {
            best_match_top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

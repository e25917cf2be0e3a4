//! # Ingredient Normalizer
//!
//! Maps free-form, user-typed ingredient names onto a controlled vocabulary,
//! returning a deterministic ranked list of plausible matches. Matching runs
//! in tiers (exact, head token, fuzzy fallback) and re-ranks by ingredient
//! category so that base ingredients beat sauces and seasonings.

pub mod candidate_generator;
pub mod normalizer;
pub mod normalizer_config;
pub mod normalizer_errors;
pub mod ranking;
pub mod similarity;
pub mod text_processing;
pub mod vocabulary;

//! # Normalize Demo
//!
//! This example runs a handful of misspelled and compound ingredient names
//! through the normalizer and prints the ranked candidates for each, along
//! with the matching tier that produced them. Settings come from the
//! environment (`INGREDIENT_TOP_K`, `INGREDIENT_SCORE_CUTOFF`, or a `.env` file).

use anyhow::Result;
use ingredient_normalizer::normalizer::IngredientNormalizer;
use ingredient_normalizer::normalizer_config::NormalizerConfig;
use ingredient_normalizer::vocabulary::{builtin_rows, parse_delimited, VocabularyRow};
use log::info;

const EXTRA_VOCABULARY: &str = "\
# name,category
chicken broth,condiment
fish,protein
fish sauce,condiment
soy sauce,condiment
sea salt,spice
";

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting normalize demo");

    let config = NormalizerConfig::from_env()?;
    let mut rows: Vec<VocabularyRow> = builtin_rows();
    rows.extend(parse_delimited(EXTRA_VOCABULARY, ','));
    let normalizer = IngredientNormalizer::from_rows(rows, config)?;

    println!("🥕 Ingredient Normalizer Demo");
    println!("=============================\n");

    let inputs = [
        "tomaeto",
        "onions",
        "garlick",
        "chicken breast",
        "  Fish!! ",
        "fish fillet",
        "salt",
        "???",
    ];

    for input in inputs {
        let top_k = normalizer.config().default_top_k;
        let cutoff = normalizer.config().score_cutoff;
        let outcome = normalizer.normalize_explained(input, top_k, cutoff);

        println!("Input: {:?} ({:?})", input, outcome.tier);
        if outcome.candidates.is_empty() {
            println!("  (no match)");
        }
        for (i, candidate) in outcome.candidates.iter().enumerate() {
            println!("  {}. {} ({:.1})", i + 1, candidate.name, candidate.score);
        }
    }

    println!("\nBest matches:");
    for (input, normalized) in inputs.iter().zip(normalizer.normalize_list(&inputs)) {
        println!("  {input:?} -> {normalized}");
    }

    Ok(())
}

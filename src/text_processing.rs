//! # Text Processing Module
//!
//! This module turns raw, user-typed ingredient text into the canonical form
//! used for every vocabulary comparison, and splits canonical text into tokens.
//!
//! ## Features
//!
//! - Case folding and whitespace trimming
//! - Punctuation stripping that keeps apostrophes and hyphens ("baker's", "all-purpose")
//! - Whitespace collapsing
//! - Tokenization on whitespace and hyphen boundaries

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

// Anything that is not a word character, whitespace, apostrophe or hyphen
const DISALLOWED_PATTERN: &str = r"[^\w\s'-]";
const WHITESPACE_PATTERN: &str = r"\s+";
const TOKEN_SEPARATOR_PATTERN: &str = r"[\s-]+";

lazy_static! {
    static ref DISALLOWED_REGEX: Regex =
        Regex::new(DISALLOWED_PATTERN).expect("Disallowed character pattern should be valid");
    static ref WHITESPACE_REGEX: Regex =
        Regex::new(WHITESPACE_PATTERN).expect("Whitespace pattern should be valid");
    static ref TOKEN_SEPARATOR_REGEX: Regex =
        Regex::new(TOKEN_SEPARATOR_PATTERN).expect("Token separator pattern should be valid");
}

/// Canonicalize raw input text
///
/// Lowercases, trims, replaces every character outside {word characters,
/// whitespace, apostrophe, hyphen} with a space, then collapses whitespace
/// runs to a single space. Garbage input canonicalizes to an empty string.
///
/// # Examples
///
/// ```rust
/// use ingredient_normalizer::text_processing::canonicalize;
///
/// assert_eq!(canonicalize("  Tomato  "), "tomato");
/// assert_eq!(canonicalize("Chicken, Breast!"), "chicken breast");
/// assert_eq!(canonicalize("baker's all-purpose"), "baker's all-purpose");
/// assert_eq!(canonicalize("?!..."), "");
/// ```
pub fn canonicalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED_REGEX.replace_all(lowered.trim(), " ");
    let collapsed = WHITESPACE_REGEX.replace_all(&stripped, " ");
    let canonical = collapsed.trim().to_string();

    trace!("Canonicalized '{}' -> '{}'", text, canonical);
    canonical
}

/// Split canonical text into word tokens on whitespace and hyphens
///
/// # Examples
///
/// ```rust
/// use ingredient_normalizer::text_processing::tokenize;
///
/// assert_eq!(tokenize("all-purpose flour"), vec!["all", "purpose", "flour"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_SEPARATOR_REGEX
        .split(text)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pick the head token of a token sequence
///
/// A single token is its own head. Among several, the longest one wins and
/// ties go to the earliest token. Returns `None` for an empty sequence.
pub fn head_token(tokens: &[String]) -> Option<&str> {
    let mut head: Option<&String> = None;
    for token in tokens {
        match head {
            Some(current) if current.chars().count() >= token.chars().count() => {}
            _ => head = Some(token),
        }
    }
    head.map(String::as_str)
}

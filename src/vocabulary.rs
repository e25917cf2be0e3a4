//! # Vocabulary Module
//!
//! This module holds the controlled ingredient vocabulary: an immutable table
//! from canonical ingredient name to category tag, built once and only read
//! afterwards.
//!
//! ## Sources
//!
//! - In-memory rows (`Vocabulary::from_rows`)
//! - Two-column delimited text (`parse_delimited`, `load_delimited_file`)
//! - JSON arrays of `{ "name", "category" }` objects (`parse_json`)
//! - The built-in starter list (`builtin_rows`)
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_normalizer::vocabulary::{parse_delimited, Vocabulary};
//!
//! let rows = parse_delimited("tomato,produce\nchicken,protein\n", ',');
//! let vocabulary = Vocabulary::from_rows(rows)?;
//!
//! assert_eq!(vocabulary.len(), 2);
//! assert_eq!(vocabulary.category("chicken"), Some("protein"));
//! # Ok::<(), ingredient_normalizer::normalizer_errors::NormalizerError>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::normalizer_errors::NormalizerError;
use crate::text_processing::{canonicalize, tokenize};

/// One raw `(name, category)` row yielded by a vocabulary source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRow {
    pub name: String,
    #[serde(default)]
    pub category: String,
}

impl VocabularyRow {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
        }
    }
}

/// A canonical vocabulary entry
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyEntry {
    /// Canonical (lowercase, punctuation-stripped) ingredient name, unique
    pub name: String,
    /// Category tag, possibly empty
    pub category: String,
}

/// Immutable ingredient vocabulary
///
/// Entries keep source order, which fixes candidate order and therefore
/// tie-breaking downstream.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    entry_tokens: Vec<Vec<String>>,
    by_name: HashMap<String, usize>,
    by_token: HashMap<String, Vec<usize>>,
}

impl Vocabulary {
    /// Build a vocabulary from source rows
    ///
    /// Names are canonicalized and categories lowercased. Rows whose name
    /// canonicalizes to nothing are skipped. A duplicate canonical name is a
    /// hard error, as is a source with no usable rows.
    pub fn from_rows<I>(rows: I) -> Result<Self, NormalizerError>
    where
        I: IntoIterator<Item = VocabularyRow>,
    {
        let mut entries = Vec::new();
        let mut entry_tokens = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_token: HashMap<String, Vec<usize>> = HashMap::new();

        for row in rows {
            let name = canonicalize(&row.name);
            if name.is_empty() {
                warn!("Skipping vocabulary row with unusable name: '{}'", row.name);
                continue;
            }
            if by_name.contains_key(&name) {
                return Err(NormalizerError::DuplicateEntry(name));
            }

            let index = entries.len();
            let tokens = tokenize(&name);
            for token in &tokens {
                let postings = by_token.entry(token.clone()).or_default();
                // A name like "salt and salt" must not list itself twice
                if postings.last() != Some(&index) {
                    postings.push(index);
                }
            }

            by_name.insert(name.clone(), index);
            entry_tokens.push(tokens);
            entries.push(VocabularyEntry {
                name,
                category: row.category.trim().to_lowercase(),
            });
        }

        if entries.is_empty() {
            return Err(NormalizerError::EmptyVocabulary);
        }

        info!(
            "Built vocabulary with {} entries and {} distinct tokens",
            entries.len(),
            by_token.len()
        );
        Ok(Self {
            entries,
            entry_tokens,
            by_name,
            by_token,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&VocabularyEntry> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    /// Category of a canonical name, if the name is in the vocabulary
    pub fn category(&self, name: &str) -> Option<&str> {
        self.get(name).map(|entry| entry.category.as_str())
    }

    /// Tokens of a canonical name, if the name is in the vocabulary
    pub fn tokens(&self, name: &str) -> Option<&[String]> {
        self.by_name
            .get(name)
            .map(|&index| self.entry_tokens[index].as_slice())
    }

    /// Entries whose own tokens include `token`, in vocabulary order
    pub fn entries_with_token(&self, token: &str) -> impl Iterator<Item = &VocabularyEntry> {
        self.by_token
            .get(token)
            .into_iter()
            .flatten()
            .map(move |&index| &self.entries[index])
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

/// Parse a two-column delimited table into rows
///
/// Blank lines and `#` comments are ignored. A row with only a name gets an
/// empty category; rows with more than two columns or an empty name are
/// skipped as malformed.
pub fn parse_delimited(text: &str, delimiter: char) -> Vec<VocabularyRow> {
    let mut rows = Vec::new();

    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        match columns.as_slice() {
            [name] if !name.is_empty() => rows.push(VocabularyRow::new(name, "")),
            [name, category] if !name.is_empty() => rows.push(VocabularyRow::new(name, category)),
            _ => warn!(
                "Skipping malformed vocabulary line {}: '{}'",
                line_number + 1,
                line
            ),
        }
    }

    debug!("Parsed {} vocabulary rows from delimited text", rows.len());
    rows
}

/// Read and parse a delimited vocabulary file
pub fn load_delimited_file<P: AsRef<Path>>(
    path: P,
    delimiter: char,
) -> Result<Vec<VocabularyRow>, NormalizerError> {
    let path = path.as_ref();
    info!("Loading vocabulary from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        NormalizerError::SourceUnreadable(format!("{}: {}", path.display(), e))
    })?;
    Ok(parse_delimited(&content, delimiter))
}

/// Parse a JSON array of `{ "name": ..., "category": ... }` objects
pub fn parse_json(json: &str) -> Result<Vec<VocabularyRow>, NormalizerError> {
    let rows: Vec<VocabularyRow> = serde_json::from_str(json)?;
    debug!("Parsed {} vocabulary rows from JSON", rows.len());
    Ok(rows)
}

/// The built-in starter vocabulary
pub fn builtin_rows() -> Vec<VocabularyRow> {
    [
        ("tomato", "produce"),
        ("onion", "produce"),
        ("garlic", "produce"),
        ("chicken", "protein"),
        ("beef", "protein"),
        ("carrot", "produce"),
        ("potato", "produce"),
        ("rice", "grain"),
        ("pasta", "grain"),
        ("olive oil", "fat"),
    ]
    .iter()
    .map(|(name, category)| VocabularyRow::new(name, category))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> Vec<VocabularyRow> {
        pairs
            .iter()
            .map(|(name, category)| VocabularyRow::new(name, category))
            .collect()
    }

    #[test]
    fn test_from_rows_canonicalizes_names() {
        let vocabulary =
            Vocabulary::from_rows(rows(&[("  Olive Oil ", "FAT"), ("Soy Sauce!", "")])).unwrap();

        assert!(vocabulary.contains("olive oil"));
        assert!(vocabulary.contains("soy sauce"));
        assert_eq!(vocabulary.category("olive oil"), Some("fat"));
        assert_eq!(vocabulary.category("soy sauce"), Some(""));
    }

    #[test]
    fn test_from_rows_rejects_duplicates() {
        let result = Vocabulary::from_rows(rows(&[("Tomato", "produce"), ("tomato", "fruit")]));
        assert_eq!(
            result.unwrap_err(),
            NormalizerError::DuplicateEntry("tomato".to_string())
        );
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert_eq!(
            Vocabulary::from_rows(Vec::new()).unwrap_err(),
            NormalizerError::EmptyVocabulary
        );
        assert_eq!(
            Vocabulary::from_rows(rows(&[("???", "produce"), ("", "")])).unwrap_err(),
            NormalizerError::EmptyVocabulary
        );
    }

    #[test]
    fn test_token_index_preserves_order() {
        let vocabulary = Vocabulary::from_rows(rows(&[
            ("chicken broth", "condiment"),
            ("beef", "protein"),
            ("chicken", "protein"),
        ]))
        .unwrap();

        let names: Vec<&str> = vocabulary
            .entries_with_token("chicken")
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["chicken broth", "chicken"]);
        assert_eq!(vocabulary.entries_with_token("chick").count(), 0);
    }

    #[test]
    fn test_token_index_no_self_duplicates() {
        let vocabulary = Vocabulary::from_rows(rows(&[("salt and salt", "")])).unwrap();
        assert_eq!(vocabulary.entries_with_token("salt").count(), 1);
    }

    #[test]
    fn test_hyphenated_names_are_tokenized() {
        let vocabulary = Vocabulary::from_rows(rows(&[("all-purpose flour", "baking")])).unwrap();
        assert_eq!(
            vocabulary.tokens("all-purpose flour").unwrap(),
            &["all", "purpose", "flour"]
        );
        assert_eq!(vocabulary.entries_with_token("purpose").count(), 1);
    }

    #[test]
    fn test_parse_delimited_skips_malformed() {
        let text = "# name,category\ntomato,produce\n\nsalt\n,spice\na,b,c\n  beef , protein  \n";
        let parsed = parse_delimited(text, ',');

        assert_eq!(
            parsed,
            rows(&[("tomato", "produce"), ("salt", ""), ("beef", "protein")])
        );
    }

    #[test]
    fn test_parse_json_optional_category() {
        let parsed =
            parse_json(r#"[{"name": "rice", "category": "grain"}, {"name": "water"}]"#).unwrap();
        assert_eq!(parsed, rows(&[("rice", "grain"), ("water", "")]));
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(matches!(
            parse_json("{not valid"),
            Err(NormalizerError::SourceUnreadable(_))
        ));
    }

    #[test]
    fn test_builtin_rows_build() {
        let vocabulary = Vocabulary::from_rows(builtin_rows()).unwrap();
        assert_eq!(vocabulary.len(), 10);
        assert_eq!(vocabulary.category("chicken"), Some("protein"));
    }
}

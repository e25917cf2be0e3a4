//! # Vocabulary Tests
//!
//! Tests for building vocabularies from files and other sources.

use std::io::Write;

use ingredient_normalizer::normalizer::IngredientNormalizer;
use ingredient_normalizer::normalizer_config::NormalizerConfig;
use ingredient_normalizer::normalizer_errors::NormalizerError;
use ingredient_normalizer::vocabulary::{
    load_delimited_file, parse_delimited, parse_json, Vocabulary, VocabularyRow,
};
use tempfile::NamedTempFile;

fn write_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_load_delimited_file() {
    let file = write_temp_file("# name\tcategory\ntomato\tproduce\nsoy sauce\tcondiment\n\nwater\n");
    let rows = load_delimited_file(file.path(), '\t').unwrap();

    assert_eq!(
        rows,
        vec![
            VocabularyRow::new("tomato", "produce"),
            VocabularyRow::new("soy sauce", "condiment"),
            VocabularyRow::new("water", ""),
        ]
    );
}

#[test]
fn test_load_missing_file_is_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");

    match load_delimited_file(&missing, ',') {
        Err(NormalizerError::SourceUnreadable(msg)) => assert!(msg.contains("missing.csv")),
        other => panic!("Expected SourceUnreadable, got {:?}", other),
    }
}

#[test]
fn test_file_to_normalizer_end_to_end() {
    let file = write_temp_file(
        "# kitchen staples\nrice,grain\nbasmati rice,grain\nrice vinegar,condiment\n",
    );
    let rows = load_delimited_file(file.path(), ',').unwrap();
    let normalizer = IngredientNormalizer::from_rows(rows, NormalizerConfig::default()).unwrap();

    assert_eq!(normalizer.vocabulary().len(), 3);
    assert_eq!(normalizer.best_match("Rice!").as_deref(), Some("rice"));
    assert_eq!(normalizer.best_match("brown rice").as_deref(), Some("rice"));
}

#[test]
fn test_comment_only_file_yields_empty_vocabulary_error() {
    let file = write_temp_file("# nothing here\n\n   \n");
    let rows = load_delimited_file(file.path(), ',').unwrap();

    assert!(rows.is_empty());
    assert_eq!(
        Vocabulary::from_rows(rows).unwrap_err(),
        NormalizerError::EmptyVocabulary
    );
}

#[test]
fn test_duplicate_after_canonicalization_is_rejected() {
    let rows = parse_delimited("Olive Oil,fat\nolive  oil!,fat\n", ',');
    assert_eq!(
        Vocabulary::from_rows(rows).unwrap_err(),
        NormalizerError::DuplicateEntry("olive oil".to_string())
    );
}

#[test]
fn test_json_source() {
    let rows = parse_json(
        r#"[
            {"name": "Chicken", "category": "Protein"},
            {"name": "chicken stock", "category": "condiment"},
            {"name": "water"}
        ]"#,
    )
    .unwrap();
    let vocabulary = Vocabulary::from_rows(rows).unwrap();

    assert_eq!(vocabulary.category("chicken"), Some("protein"));
    assert_eq!(vocabulary.category("water"), Some(""));
    assert_eq!(
        vocabulary.names().collect::<Vec<_>>(),
        vec!["chicken", "chicken stock", "water"]
    );
}

//! # Normalizer Error Types Module
//!
//! This module defines the error types surfaced by the ingredient normalizer.
//! Only construction can fail: a query that finds nothing is an empty result,
//! never an error.

/// Errors raised while building a vocabulary or configuring an engine
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizerError {
    /// The vocabulary source yielded no usable entries
    EmptyVocabulary,
    /// Two source rows canonicalize to the same ingredient name
    DuplicateEntry(String),
    /// The vocabulary source could not be read or decoded
    SourceUnreadable(String),
    /// A configuration value is out of range or unparsable
    InvalidConfig(String),
}

impl std::fmt::Display for NormalizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizerError::EmptyVocabulary => write!(f, "Vocabulary error: no usable entries"),
            NormalizerError::DuplicateEntry(name) => {
                write!(f, "Vocabulary error: duplicate entry '{name}'")
            }
            NormalizerError::SourceUnreadable(msg) => write!(f, "Source error: {msg}"),
            NormalizerError::InvalidConfig(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for NormalizerError {}

impl From<serde_json::Error> for NormalizerError {
    fn from(err: serde_json::Error) -> Self {
        NormalizerError::SourceUnreadable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            NormalizerError::DuplicateEntry("tomato".to_string()).to_string(),
            "Vocabulary error: duplicate entry 'tomato'"
        );
        assert!(NormalizerError::EmptyVocabulary
            .to_string()
            .contains("no usable entries"));
    }
}

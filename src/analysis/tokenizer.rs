//! Tokenizer implementations for text analysis.

use std::sync::Arc;

use regex::Regex;

use crate::error::{GameRankError, Result};

/// Trait for tokenizers that convert text into raw tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// The default search tokenizer.
///
/// Lower-cases the input and splits on every character outside `[a-z0-9]`,
/// so punctuation, whitespace and non-ASCII letters all act as separators.
#[derive(Clone, Debug, Default)]
pub struct SearchTokenizer;

impl SearchTokenizer {
    /// Create a new search tokenizer.
    pub fn new() -> Self {
        SearchTokenizer
    }
}

impl Tokenizer for SearchTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn name(&self) -> &'static str {
        "search"
    }
}

/// A regex-based tokenizer that extracts every match of a pattern.
///
/// Matching runs against the lower-cased input, so patterns should be
/// written in lower case.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a tokenizer extracting matches of `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| GameRankError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|mat| mat.as_str().to_owned())
            .filter(|token| !token.is_empty())
            .collect()
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_tokenizer_lowercases_and_splits() {
        let tokenizer = SearchTokenizer::new();
        assert_eq!(
            tokenizer.tokenize("Half-Life 2: Episode ONE"),
            vec!["half", "life", "2", "episode", "one"]
        );
    }

    #[test]
    fn test_search_tokenizer_non_ascii_is_separator() {
        let tokenizer = SearchTokenizer::new();
        assert_eq!(tokenizer.tokenize("Pokémon"), vec!["pok", "mon"]);
    }

    #[test]
    fn test_search_tokenizer_empty() {
        let tokenizer = SearchTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  --  ").is_empty());
    }

    #[test]
    fn test_regex_tokenizer() {
        let tokenizer = RegexTokenizer::with_pattern(r"[a-z]+").unwrap();
        assert_eq!(tokenizer.pattern(), "[a-z]+");
        assert_eq!(tokenizer.tokenize("Portal 2 GOTY"), vec!["portal", "goty"]);
    }

    #[test]
    fn test_regex_tokenizer_invalid_pattern() {
        let result = RegexTokenizer::with_pattern("[unclosed");
        assert!(matches!(result, Err(GameRankError::Analysis(_))));
    }
}

//! Text analysis for lexical scoring.
//!
//! Raw titles, descriptions and queries are turned into search tokens by an
//! [`Analyzer`]: a [`Tokenizer`] followed by a chain of [`TokenFilter`]s.
//!
//! The standard pipeline lower-cases the input, treats every character outside
//! `[a-z0-9]` as a separator and drops tokens shorter than two characters:
//!
//! ```
//! use gamerank::analysis::tokenize;
//!
//! assert_eq!(tokenize("Dota-like Arena"), vec!["dota", "like", "arena"]);
//! assert_eq!(tokenize("Dota 2"), vec!["dota"]);
//! assert!(tokenize("").is_empty());
//! ```

pub mod analyzer;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use token_filter::{MinLengthFilter, StopFilter, TokenFilter};
pub use tokenizer::{RegexTokenizer, SearchTokenizer, Tokenizer};

/// Tokenize text with the standard search pipeline.
///
/// Deterministic and side-effect free; empty input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    Analyzer::standard().analyze(text)
}

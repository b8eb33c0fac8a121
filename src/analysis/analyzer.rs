//! Analyzer pipelines combining a tokenizer with token filters.

use std::sync::Arc;

use crate::analysis::token_filter::{MinLengthFilter, StopFilter, TokenFilter};
use crate::analysis::tokenizer::{RegexTokenizer, SearchTokenizer, Tokenizer};
use crate::error::Result;

/// A tokenizer followed by an ordered chain of filters.
#[derive(Clone)]
pub struct Analyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn TokenFilter>>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Analyzer {
    /// Create an analyzer from a tokenizer with no filters.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// The standard search pipeline: [`SearchTokenizer`] + [`MinLengthFilter`] (2).
    pub fn standard() -> Self {
        Self::new(Arc::new(SearchTokenizer::new())).with_filter(Arc::new(MinLengthFilter::default()))
    }

    /// Build an analyzer from configuration knobs.
    ///
    /// `token_pattern` swaps the default tokenizer for a [`RegexTokenizer`];
    /// `stop_words` appends an English [`StopFilter`].
    pub fn from_options(token_pattern: Option<&str>, stop_words: bool) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenizer> = match token_pattern {
            Some(pattern) => Arc::new(RegexTokenizer::with_pattern(pattern)?),
            None => Arc::new(SearchTokenizer::new()),
        };

        let mut analyzer = Self::new(tokenizer).with_filter(Arc::new(MinLengthFilter::default()));
        if stop_words {
            analyzer = analyzer.with_filter(Arc::new(StopFilter::new()));
        }
        Ok(analyzer)
    }

    /// Append a filter to the chain.
    pub fn with_filter(mut self, filter: Arc<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Run the full pipeline over `text`.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(text);
        self.filters
            .iter()
            .fold(tokens, |tokens, filter| filter.filter(tokens))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::standard()
    }
}

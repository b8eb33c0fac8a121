//! Per-item lexical scoring over the title and description fields.

use serde::{Deserialize, Serialize};

use crate::analysis::Analyzer;
use crate::catalog::CatalogItem;
use crate::lexical::bm25::{Bm25Config, Bm25Corpus};

/// Scores a candidate set against already-tokenized query terms.
pub trait LexicalScorer: Send + Sync + std::fmt::Debug {
    /// One `(item_id, score)` pair per candidate, in candidate order. Scores
    /// are `>= 0` and `0.0` everywhere when `query_tokens` is empty.
    fn score(&self, query_tokens: &[String], candidates: &[CatalogItem]) -> Vec<(u64, f32)>;

    /// Get scorer name.
    fn name(&self) -> &str;
}

/// Relative weight of each field in the lexical score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f32,
    pub description: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            title: 2.0,
            description: 1.0,
        }
    }
}

/// `title_weight * BM25(title) + description_weight * BM25(description)`,
/// with one BM25 corpus per field built from the candidate set.
#[derive(Debug, Clone, Default)]
pub struct FieldWeightedBm25Scorer {
    analyzer: Analyzer,
    config: Bm25Config,
    weights: FieldWeights,
}

impl FieldWeightedBm25Scorer {
    /// Create a scorer analyzing fields with `analyzer`.
    pub fn new(analyzer: Analyzer, config: Bm25Config, weights: FieldWeights) -> Self {
        FieldWeightedBm25Scorer {
            analyzer,
            config,
            weights,
        }
    }

    /// The analyzer applied to item fields.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// BM25 parameters.
    pub fn config(&self) -> &Bm25Config {
        &self.config
    }

    /// Per-field weights.
    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }
}

impl LexicalScorer for FieldWeightedBm25Scorer {
    fn score(&self, query_tokens: &[String], candidates: &[CatalogItem]) -> Vec<(u64, f32)> {
        if query_tokens.is_empty() {
            return candidates.iter().map(|item| (item.id, 0.0)).collect();
        }

        let titles: Vec<Vec<String>> = candidates
            .iter()
            .map(|item| self.analyzer.analyze(&item.title))
            .collect();
        let descriptions: Vec<Vec<String>> = candidates
            .iter()
            .map(|item| self.analyzer.analyze(&item.description))
            .collect();

        let title_corpus = Bm25Corpus::new(&titles);
        let description_corpus = Bm25Corpus::new(&descriptions);

        candidates
            .iter()
            .enumerate()
            .map(|(doc, item)| {
                let title = title_corpus.score(doc, query_tokens, &self.config);
                let description = description_corpus.score(doc, query_tokens, &self.config);
                (
                    item.id,
                    self.weights.title * title + self.weights.description * description,
                )
            })
            .collect()
    }

    fn name(&self) -> &str {
        "field_weighted_bm25"
    }
}

/// Score `candidates` with the default analyzer, BM25 parameters and field
/// weights.
pub fn score_lexical(query_tokens: &[String], candidates: &[CatalogItem]) -> Vec<(u64, f32)> {
    FieldWeightedBm25Scorer::default().score(query_tokens, candidates)
}

//! BM25 over a small, per-request corpus.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Config {
    /// Term frequency saturation.
    pub k1: f32,
    /// Document length normalization.
    pub b: f32,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Bm25Config { k1: 1.5, b: 0.75 }
    }
}

/// Term statistics of one document.
#[derive(Debug, Clone, Default)]
struct DocumentStats {
    length: usize,
    term_frequencies: AHashMap<String, u32>,
}

/// Document and collection statistics for a set of tokenized documents.
#[derive(Debug, Clone, Default)]
pub struct Bm25Corpus {
    documents: Vec<DocumentStats>,
    document_frequencies: AHashMap<String, u32>,
    avg_doc_length: f32,
}

impl Bm25Corpus {
    /// Build a corpus; document `i` of the corpus is `documents[i]`.
    pub fn new<D: AsRef<[String]>>(documents: &[D]) -> Self {
        let mut document_frequencies: AHashMap<String, u32> = AHashMap::new();
        let mut total_length = 0usize;

        let documents: Vec<DocumentStats> = documents
            .iter()
            .map(|tokens| {
                let tokens = tokens.as_ref();
                let mut term_frequencies: AHashMap<String, u32> = AHashMap::new();
                for token in tokens {
                    *term_frequencies.entry(token.clone()).or_insert(0) += 1;
                }
                for term in term_frequencies.keys() {
                    *document_frequencies.entry(term.clone()).or_insert(0) += 1;
                }
                total_length += tokens.len();
                DocumentStats {
                    length: tokens.len(),
                    term_frequencies,
                }
            })
            .collect();

        let avg_doc_length = if documents.is_empty() {
            0.0
        } else {
            total_length as f32 / documents.len() as f32
        };

        Bm25Corpus {
            documents,
            document_frequencies,
            avg_doc_length,
        }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Mean document length in tokens; `0.0` for an empty corpus.
    pub fn avg_doc_length(&self) -> f32 {
        self.avg_doc_length
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.document_frequencies.get(term).copied().unwrap_or(0)
    }

    /// Inverse document frequency, `ln(1 + (N - n + 0.5) / (n + 0.5))`.
    ///
    /// Always positive, including for terms present in every document.
    pub fn idf(&self, term: &str) -> f32 {
        let n = self.document_frequency(term) as f32;
        let total = self.documents.len() as f32;
        (1.0 + (total - n + 0.5) / (n + 0.5)).ln()
    }

    /// BM25 score of document `doc` for `query_terms`. Repeated query terms
    /// count once per occurrence.
    pub fn score(&self, doc: usize, query_terms: &[String], config: &Bm25Config) -> f32 {
        let Some(stats) = self.documents.get(doc) else {
            return 0.0;
        };
        // An all-empty corpus has no length to normalize against.
        let avg_len = if self.avg_doc_length > 0.0 {
            self.avg_doc_length
        } else {
            1.0
        };
        let doc_len = stats.length as f32;

        let mut total_score = 0.0;
        for term in query_terms {
            let tf = stats.term_frequencies.get(term).copied().unwrap_or(0) as f32;
            if tf == 0.0 {
                continue;
            }
            let tf_component = (tf * (config.k1 + 1.0))
                / (tf + config.k1 * (1.0 - config.b + config.b * (doc_len / avg_len)));
            total_score += self.idf(term) * tf_component;
        }
        total_score
    }

    /// Scores of every document, in corpus order.
    pub fn scores(&self, query_terms: &[String], config: &Bm25Config) -> Vec<f32> {
        (0..self.documents.len())
            .map(|doc| self.score(doc, query_terms, config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|d| d.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    fn terms(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_corpus_statistics() {
        let corpus = Bm25Corpus::new(&docs(&[&["dota"], &["dota", "like", "arena"]]));
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.avg_doc_length(), 2.0);
        assert_eq!(corpus.document_frequency("dota"), 2);
        assert_eq!(corpus.document_frequency("arena"), 1);
        assert_eq!(corpus.document_frequency("missing"), 0);
    }

    #[test]
    fn test_idf_is_positive_for_common_terms() {
        let corpus = Bm25Corpus::new(&docs(&[&["dota"], &["dota", "like", "arena"]]));
        assert!(corpus.idf("dota") > 0.0);
        assert!(corpus.idf("arena") > corpus.idf("dota"));
    }

    #[test]
    fn test_shorter_document_scores_higher() {
        let corpus = Bm25Corpus::new(&docs(&[&["dota"], &["dota", "like", "arena"]]));
        let scores = corpus.scores(&terms(&["dota"]), &Bm25Config::default());
        assert!(scores[0] > scores[1]);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn test_term_frequency_saturates() {
        let corpus = Bm25Corpus::new(&docs(&[
            &["space", "x", "y"],
            &["space", "space", "y"],
            &["z", "x", "y"],
        ]));
        let scores = corpus.scores(&terms(&["space"]), &Bm25Config::default());
        assert!(scores[1] > scores[0]);
        assert!(scores[1] < 2.0 * scores[0]);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_empty_documents_and_corpus() {
        let corpus = Bm25Corpus::new(&docs(&[&[], &[]]));
        assert_eq!(corpus.scores(&terms(&["any"]), &Bm25Config::default()), vec![0.0, 0.0]);

        let empty = Bm25Corpus::new::<Vec<String>>(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.score(0, &terms(&["any"]), &Bm25Config::default()), 0.0);
    }
}

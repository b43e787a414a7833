//! Term-weighting vectorizer (TF-IDF) and cosine similarity.
//!
//! Weights are raw term counts scaled by smoothed inverse document
//! frequency, `ln((1 + n) / (1 + df)) + 1`, and each row is L2-normalized.
//! Rows are dense; corpora here are a few dozen documents at most.

use super::tokenize;
use itertools::Itertools;
use std::collections::HashMap;

/// A fitted document-term matrix.
#[derive(Debug, Clone, Default)]
pub struct TfidfMatrix {
    /// Vocabulary, sorted alphabetically. Column `j` of every row is `terms[j]`.
    pub terms: Vec<String>,
    /// One L2-normalized weight vector per input document.
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    /// Keep only the most frequent terms across the corpus.
    max_features: Option<usize>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Build the vocabulary from `documents` and vectorize them.
    ///
    /// An empty vocabulary (every token a stop word) is not an error: each
    /// row is simply an empty, all-zero vector.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfidfMatrix {
        let tokenized: Vec<Vec<String>> =
            documents.iter().map(|d| tokenize(d.as_ref())).collect();

        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            for t in tokens {
                *corpus_counts.entry(t.as_str()).or_insert(0) += 1;
            }
            for t in tokens.iter().unique() {
                *doc_freq.entry(t.as_str()).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<&str> = corpus_counts.keys().copied().collect();
        if let Some(max) = self.max_features {
            if terms.len() > max {
                terms = corpus_counts
                    .iter()
                    .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
                    .take(max)
                    .map(|(t, _)| *t)
                    .collect();
            }
        }
        terms.sort_unstable();

        let index: HashMap<&str, usize> = terms.iter().enumerate().map(|(i, t)| (*t, i)).collect();
        let n = documents.len() as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|t| ((1.0 + n) / (1.0 + doc_freq[t] as f64)).ln() + 1.0)
            .collect();

        let rows = tokenized
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0; terms.len()];
                for t in tokens {
                    if let Some(&j) = index.get(t.as_str()) {
                        row[j] += 1.0;
                    }
                }
                for (w, idf) in row.iter_mut().zip(&idf) {
                    *w *= idf;
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        TfidfMatrix {
            terms: terms.into_iter().map(String::from).collect(),
            rows,
        }
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|w| *w /= norm);
    }
}

/// Cosine similarity with `epsilon` added to the norm product, so an
/// all-zero vector scores 0 against everything instead of dividing by zero.
pub fn cosine(a: &[f64], b: &[f64], epsilon: f64) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    (dot / (na * nb + epsilon)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sorted_without_stop_words() {
        let m = TfidfVectorizer::new().fit_transform(&["the bitcoin price", "ether price"]);
        assert_eq!(m.terms, vec!["bitcoin", "ether", "price"]);
        assert_eq!(m.rows.len(), 2);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let m = TfidfVectorizer::new().fit_transform(&["bitcoin bitcoin ether", "solana"]);
        for row in &m.rows {
            let norm: f64 = row.iter().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let m = TfidfVectorizer::new().fit_transform(&["price bitcoin", "price ether", "price solana"]);
        let price = m.terms.iter().position(|t| t == "price").unwrap();
        let bitcoin = m.terms.iter().position(|t| t == "bitcoin").unwrap();
        assert!(m.rows[0][bitcoin] > m.rows[0][price]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let m = TfidfVectorizer::new()
            .with_max_features(2)
            .fit_transform(&["etf etf etf", "etf halving halving", "miners"]);
        assert_eq!(m.terms, vec!["etf", "halving"]);
        assert_eq!(m.rows[2], vec![0.0, 0.0]);
    }

    #[test]
    fn test_all_stop_words_gives_empty_vocabulary() {
        let m = TfidfVectorizer::new().fit_transform(&["the and of", "it is"]);
        assert_eq!(m.n_terms(), 0);
        assert!(m.rows.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0], 1e-8), 0.0);
        assert!((cosine(&[1.0, 0.0], &[1.0, 0.0], 1e-8) - 1.0).abs() < 1e-6);
    }
}

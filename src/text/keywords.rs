//! Keyword extraction as a capability with two strategies.
//!
//! - [`TfIdfKeywords`]: sentence-level TF-IDF over the single document,
//!   backed by `keyword_extraction`. Always available.
//! - `EmbeddingKeywords` (feature `embeddings`): ranks 1–2 word candidate
//!   phrases by embedding similarity to the whole document, using a
//!   multilingual sentence-embedding model.
//!
//! [`Keywords`] picks a primary strategy once at start-up and falls back to
//! TF-IDF whenever the primary fails. It never returns an error.

use super::normalize_whitespace;
use super::char_len;
use itertools::Itertools;
use keyword_extraction::tf_idf::{TextSplit, TfIdf, TfIdfParams};
use once_cell::sync::Lazy;
use std::error::Error;
use stop_words::LANGUAGE;
use tracing::{debug, info, warn};

/// English stop words from the `stop_words` ISO list, lowercased.
static KEYWORD_STOP_WORDS: Lazy<Vec<String>> = Lazy::new(|| {
    stop_words::get(LANGUAGE::English)
        .iter()
        .map(|w| w.to_lowercase())
        .collect()
});

/// A way of pulling salient terms or phrases out of one document.
pub trait KeywordExtractor {
    fn name(&self) -> &'static str;

    /// Up to `top_k` keywords, best first.
    fn extract(&self, text: &str, top_k: usize) -> Result<Vec<String>, Box<dyn Error>>;
}

/// Highest-scoring TF-IDF terms of a single document, treating each
/// sentence as a document for IDF.
#[derive(Debug, Clone)]
pub struct TfIdfKeywords {
    max_features: usize,
}

impl TfIdfKeywords {
    /// `max_features` caps how many scored terms are ever considered.
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }
}

impl Default for TfIdfKeywords {
    fn default() -> Self {
        Self::new(200)
    }
}

impl KeywordExtractor for TfIdfKeywords {
    fn name(&self) -> &'static str {
        "tfidf"
    }

    fn extract(&self, text: &str, top_k: usize) -> Result<Vec<String>, Box<dyn Error>> {
        let stop_words = &*KEYWORD_STOP_WORDS;
        let tfidf = TfIdf::new(TfIdfParams::TextBlock(
            text,
            stop_words,
            None,
            TextSplit::Sentences,
        ));

        // rank every term, then break score ties by term for a stable order
        let vocabulary = text.split_whitespace().count();
        Ok(tfidf
            .get_ranked_word_scores(vocabulary)
            .into_iter()
            .map(|(term, score)| (term.to_lowercase(), score))
            .filter(|(term, _)| char_len(term) >= 2 && !stop_words.contains(term))
            .sorted_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .take(self.max_features.min(top_k))
            .map(|(term, _)| term)
            .collect())
    }
}

#[cfg(feature = "embeddings")]
pub use embedding::EmbeddingKeywords;

#[cfg(feature = "embeddings")]
mod embedding {
    use super::KeywordExtractor;
    use crate::text::tfidf::cosine;
    use crate::text::tokenize;
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use itertools::Itertools;
    use std::error::Error;

    /// KeyBERT-style extraction over a multilingual MiniLM model.
    pub struct EmbeddingKeywords {
        model: TextEmbedding,
    }

    impl EmbeddingKeywords {
        /// Load the model. Fails when the model cannot be downloaded or
        /// initialized.
        pub fn try_new() -> Result<Self, Box<dyn Error>> {
            let model = TextEmbedding::try_new(
                InitOptions::new(EmbeddingModel::ParaphraseMLMiniLML12V2)
                    .with_show_download_progress(false),
            )?;
            Ok(Self { model })
        }
    }

    /// Unigrams and bigrams over the stop-word-filtered token stream.
    pub(super) fn candidates(text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        let bigrams = tokens.iter().tuple_windows().map(|(a, b)| format!("{a} {b}"));
        tokens.iter().cloned().chain(bigrams).unique().collect()
    }

    impl KeywordExtractor for EmbeddingKeywords {
        fn name(&self) -> &'static str {
            "embedding"
        }

        fn extract(&self, text: &str, top_k: usize) -> Result<Vec<String>, Box<dyn Error>> {
            let candidates = candidates(text);
            if candidates.is_empty() {
                return Ok(Vec::new());
            }

            let doc = self
                .model
                .embed(vec![text], None)?
                .pop()
                .ok_or("embedding model returned no document vector")?;
            let doc: Vec<f64> = doc.into_iter().map(f64::from).collect();
            let embedded = self.model.embed(candidates.clone(), None)?;

            Ok(candidates
                .into_iter()
                .zip(embedded)
                .map(|(phrase, v)| {
                    let v: Vec<f64> = v.into_iter().map(f64::from).collect();
                    (phrase, cosine(&doc, &v, 1e-8))
                })
                .sorted_by(|a, b| b.1.total_cmp(&a.1))
                .take(top_k)
                .map(|(phrase, _)| phrase)
                .collect())
        }
    }
}

/// Keyword extraction with a primary strategy chosen once and a TF-IDF
/// fallback.
pub struct Keywords {
    primary: Option<Box<dyn KeywordExtractor>>,
    fallback: TfIdfKeywords,
    min_text_chars: usize,
}

impl Keywords {
    pub fn new(
        primary: Option<Box<dyn KeywordExtractor>>,
        fallback: TfIdfKeywords,
        min_text_chars: usize,
    ) -> Self {
        Self {
            primary,
            fallback,
            min_text_chars,
        }
    }

    /// Select the strategy for this process. With `prefer_embeddings` set
    /// and the `embeddings` feature compiled in, the embedding model is
    /// loaded; if that fails, only TF-IDF is used from then on.
    pub fn select(prefer_embeddings: bool, max_features: usize, min_text_chars: usize) -> Self {
        let primary = if prefer_embeddings {
            load_primary()
        } else {
            None
        };
        let keywords = Self::new(primary, TfIdfKeywords::new(max_features), min_text_chars);
        info!(strategy = keywords.strategy(), "Keyword extractor selected");
        keywords
    }

    pub fn strategy(&self) -> &'static str {
        self.primary
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    /// Up to `top_k` distinct keywords for `text`. Empty for text under the
    /// length floor. Never fails.
    pub fn extract(&self, text: &str, top_k: usize) -> Vec<String> {
        let text = normalize_whitespace(text);
        if char_len(&text) < self.min_text_chars {
            return Vec::new();
        }

        if let Some(primary) = &self.primary {
            match primary.extract(&text, top_k) {
                Ok(found) => return dedupe(found, top_k),
                Err(e) => {
                    debug!(strategy = primary.name(), error = %e, "Primary keyword extractor failed; falling back")
                }
            }
        }

        match self.fallback.extract(&text, top_k) {
            Ok(found) => dedupe(found, top_k),
            Err(e) => {
                warn!(error = %e, "Fallback keyword extractor failed");
                Vec::new()
            }
        }
    }
}

fn dedupe(found: Vec<String>, top_k: usize) -> Vec<String> {
    found.into_iter().unique().take(top_k).collect()
}

#[cfg(feature = "embeddings")]
fn load_primary() -> Option<Box<dyn KeywordExtractor>> {
    match EmbeddingKeywords::try_new() {
        Ok(model) => Some(Box::new(model)),
        Err(e) => {
            warn!(error = %e, "Embedding keyword model unavailable; using TF-IDF keywords");
            None
        }
    }
}

#[cfg(not(feature = "embeddings"))]
fn load_primary() -> Option<Box<dyn KeywordExtractor>> {
    debug!("Built without the embeddings feature; using TF-IDF keywords");
    None
}

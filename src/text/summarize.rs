//! Extractive summaries: graph-ranked sentence selection, and the simpler
//! longest-sentences heuristic.

use super::segment::{Segmented, Sentence, segment, split_sentences};
use super::textrank::{RankParams, build_similarity_matrix, rank};
use super::{char_len, normalize_whitespace};
use crate::utils::truncate_chars;
use tracing::debug;

/// Knobs for the graph summarizer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRankSummarizer {
    pub max_sentences: usize,
    pub min_text_chars: usize,
    pub min_sentence_chars: usize,
    pub rank: RankParams,
}

impl Default for TextRankSummarizer {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            min_text_chars: 40,
            min_sentence_chars: 10,
            rank: RankParams::default(),
        }
    }
}

impl TextRankSummarizer {
    /// Summarize `text` into at most `max_sentences` of its own sentences,
    /// in source order.
    pub fn summarize(&self, text: &str) -> String {
        let sentences = match segment(text, self.min_text_chars, self.min_sentence_chars) {
            Segmented::Short(text) => {
                debug!(chars = char_len(&text), "text below summary floor; returned as-is");
                return text;
            }
            Segmented::Sentences(s) => s,
        };

        if sentences.len() <= self.max_sentences {
            return join_sentences(&sentences);
        }

        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        let sim = build_similarity_matrix(&texts, self.rank.epsilon);
        let scores = rank(&sim, &self.rank);
        select_summary(&sentences, &scores, self.max_sentences)
    }
}

/// Pick the `max_sentences` best-scoring sentences and join them in their
/// original order. Equal scores go to the earlier sentence.
pub fn select_summary(sentences: &[Sentence], scores: &[f64], max_sentences: usize) -> String {
    if sentences.len() <= max_sentences {
        return join_sentences(sentences);
    }

    let mut order: Vec<usize> = (0..sentences.len()).collect();
    // stable sort keeps index order among ties
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    let mut picked: Vec<usize> = order.into_iter().take(max_sentences).collect();
    picked.sort_unstable();

    picked
        .into_iter()
        .map(|i| sentences[i].text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_sentences(sentences: &[Sentence]) -> String {
    sentences
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Knobs for [`LengthSummarizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct LengthSummarizer {
    pub max_sentences: usize,
    /// Text at or under this many characters is returned unchanged.
    pub length_threshold: usize,
    pub max_chars: usize,
}

impl Default for LengthSummarizer {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            length_threshold: 120,
            max_chars: 400,
        }
    }
}

impl LengthSummarizer {
    /// Keep the longest sentences, longest first, capped at `max_chars`
    /// with a trailing `...`.
    pub fn summarize(&self, text: &str) -> String {
        let text = normalize_whitespace(text);
        if text.is_empty() || char_len(&text) <= self.length_threshold {
            return text;
        }

        let sentences = split_sentences(&text);
        if sentences.len() <= 1 {
            return self.cap(text);
        }

        let mut ranked = sentences;
        ranked.sort_by(|a, b| char_len(b).cmp(&char_len(a)));
        ranked.truncate(self.max_sentences);
        self.cap(ranked.join(" "))
    }

    fn cap(&self, text: String) -> String {
        if char_len(&text) > self.max_chars {
            format!("{}...", truncate_chars(&text, self.max_chars))
        } else {
            text
        }
    }
}

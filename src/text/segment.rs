//! Sentence segmentation by punctuation boundaries.
//!
//! Boundaries are `.`, `!`, or `?` followed by whitespace. Korean
//! sentence-final endings are only caught when they share that punctuation.

use super::{char_len, normalize_whitespace};
use once_cell::sync::Lazy;
use regex::Regex;

static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// A sentence cut from a document, with its position among the kept sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub position: usize,
    pub text: String,
}

/// Outcome of segmenting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segmented {
    /// Normalized text was under the length floor; use it verbatim.
    Short(String),
    /// Sentences that survived the fragment filter, in source order.
    Sentences(Vec<Sentence>),
}

/// Split on `.`/`!`/`?` followed by whitespace, keeping the punctuation with
/// the preceding piece. Pieces are trimmed; empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for m in BOUNDARY_RE.find_iter(text) {
        // punctuation is a single ASCII byte
        pieces.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Segment raw document text into rankable sentences.
///
/// Newlines become spaces. Text shorter than `min_text_chars` comes back
/// as [`Segmented::Short`]. Fragments of `min_sentence_chars` characters
/// or fewer are discarded.
pub fn segment(text: &str, min_text_chars: usize, min_sentence_chars: usize) -> Segmented {
    let text = normalize_whitespace(text);
    if char_len(&text) < min_text_chars {
        return Segmented::Short(text);
    }

    let sentences = split_sentences(&text)
        .into_iter()
        .filter(|s| char_len(s) > min_sentence_chars)
        .enumerate()
        .map(|(position, text)| Sentence { position, text })
        .collect();
    Segmented::Sentences(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_punctuation() {
        let parts = split_sentences("Bitcoin rose. Did ether follow? Yes!  It did.");
        assert_eq!(parts, vec!["Bitcoin rose.", "Did ether follow?", "Yes!", "It did."]);
    }

    #[test]
    fn test_split_ignores_punctuation_without_whitespace() {
        let parts = split_sentences("Price hit 1.5x on v2.0 launch. Then fell.");
        assert_eq!(parts, vec!["Price hit 1.5x on v2.0 launch.", "Then fell."]);
    }

    #[test]
    fn test_short_text_returned_verbatim() {
        let out = segment("  Short\nheadline only  ", 40, 10);
        assert_eq!(out, Segmented::Short("Short headline only".to_string()));
    }

    #[test]
    fn test_segment_drops_fragments() {
        let text = "Bitcoin climbed to a new weekly high. Ok. Analysts expect more volatility ahead.";
        let Segmented::Sentences(sents) = segment(text, 40, 10) else {
            panic!("expected sentences");
        };
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0].position, 0);
        assert_eq!(sents[1].position, 1);
        assert_eq!(sents[1].text, "Analysts expect more volatility ahead.");
    }

    #[test]
    fn test_segment_korean_with_shared_punctuation() {
        let text = "비트코인 가격이 오늘 크게 상승했습니다. 이더리움도 함께 오르며 시장 분위기가 좋아졌습니다.";
        let Segmented::Sentences(sents) = segment(text, 40, 10) else {
            panic!("expected sentences");
        };
        assert_eq!(sents.len(), 2);
    }
}

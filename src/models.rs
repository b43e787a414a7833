//! Data models for news documents and their analysed representations.
//!
//! - [`Document`]: a news item as handed over by ingestion
//! - [`AnalyzedArticle`]: a document plus its summary, keywords, and topic
//! - [`FrontPage`]: one rendered edition of analysed articles
//!
//! Everything here is rebuilt on every render; nothing is persisted.

use crate::utils::edition_for;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ko,
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Ko => f.write_str("ko"),
            Language::En => f.write_str("en"),
        }
    }
}

/// A news item before analysis.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Document {
    pub title: String,
    /// Display name of the outlet or feed.
    pub source: String,
    /// Article body, or the title when no body could be fetched.
    pub raw_text: String,
    #[serde(rename = "lang")]
    pub language: Language,
    #[serde(default, rename = "url", skip_serializing_if = "Option::is_none")]
    pub origin_url: Option<String>,
}

impl Document {
    pub fn new(title: impl Into<String>, source: impl Into<String>, raw_text: impl Into<String>, language: Language) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            raw_text: raw_text.into(),
            language,
            origin_url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.origin_url = Some(url.into());
        self
    }
}

/// A document with everything the pipeline derived from it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyzedArticle {
    #[serde(flatten)]
    pub document: Document,
    pub summary: String,
    pub keywords: Vec<String>,
    /// Topic group within this edition. Values are arbitrary; only equality matters.
    pub topic: usize,
}

/// A collection of analysed articles representing a single edition.
///
/// The `time_of_day` field is `"morning"`, `"afternoon"`, or `"evening"`.
#[derive(Debug, Deserialize, Serialize)]
pub struct FrontPage {
    /// The date of the edition in `YYYY-MM-DD` format.
    pub local_date: String,
    pub time_of_day: String,
    pub local_time: String,
    /// Keyword strategy that produced the keywords ("embedding" or "tfidf").
    pub keyword_strategy: String,
    pub articles: Vec<AnalyzedArticle>,
}

impl FrontPage {
    /// An edition stamped from a single clock reading, so the date, the
    /// edition name and the time always agree.
    pub fn stamped(
        now: NaiveDateTime,
        keyword_strategy: impl Into<String>,
        articles: Vec<AnalyzedArticle>,
    ) -> Self {
        Self {
            local_date: now.date().to_string(),
            time_of_day: edition_for(now.time()).to_string(),
            local_time: now.time().format("%H:%M:%S").to_string(),
            keyword_strategy: keyword_strategy.into(),
            articles,
        }
    }

    /// Number of distinct topics in this edition.
    pub fn topic_count(&self) -> usize {
        let mut topics: Vec<usize> = self.articles.iter().map(|a| a.topic).collect();
        topics.sort_unstable();
        topics.dedup();
        topics.len()
    }
}

//! Per-render analysis: summary and keywords per document, then one topic
//! clustering pass over the whole batch.

use crate::config::{Config, SummaryMethod};
use crate::models::{AnalyzedArticle, Document};
use crate::text::keywords::Keywords;
use crate::utils::truncate_for_log;
use tracing::{debug, info, instrument};

/// Analyse a batch of documents. Output order matches input order.
#[instrument(level = "info", skip_all, fields(documents = documents.len()))]
pub fn analyze(documents: Vec<Document>, config: &Config, keywords: &Keywords) -> Vec<AnalyzedArticle> {
    let textrank = config.textrank_summarizer();
    let by_length = config.length_summarizer();
    let summarize = |text: &str| match config.summary.method {
        SummaryMethod::TextRank => textrank.summarize(text),
        SummaryMethod::Length => by_length.summarize(text),
    };

    let texts: Vec<&str> = documents.iter().map(|d| d.raw_text.as_str()).collect();
    let topics = config.topic_clusterer().assign(&texts);

    let articles: Vec<AnalyzedArticle> = documents
        .into_iter()
        .zip(topics)
        .enumerate()
        .map(|(i, (document, topic))| {
            let summary = summarize(&document.raw_text);
            let found = keywords.extract(&document.raw_text, config.keywords.top_k);
            debug!(
                index = i,
                topic,
                keywords = found.len(),
                summary = %truncate_for_log(&summary, 80),
                "Analysed document"
            );
            AnalyzedArticle {
                document,
                summary,
                keywords: found,
                topic,
            }
        })
        .collect();

    info!(articles = articles.len(), strategy = keywords.strategy(), "Analysis complete");
    articles
}

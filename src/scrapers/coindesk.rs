//! Coindesk Korea front page headlines.
//!
//! Only `<h3>` headline text is scraped; the headline doubles as the raw
//! text. This breaks whenever the page layout changes.

use super::body::element_text;
use super::get_text;
use crate::config::SourcesConfig;
use crate::models::{Document, Language};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::instrument;

const SOURCE_NAME: &str = "코인데스크 코리아";

static HEADLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());

#[instrument(level = "info", skip_all)]
pub async fn fetch_documents(
    client: &Client,
    config: &SourcesConfig,
) -> Result<Vec<Document>, Box<dyn Error>> {
    let html = get_text(client, &config.coindesk_url).await?;
    Ok(parse_headlines(&html, config.coindesk_limit))
}

/// Non-empty headlines among the first `limit` `<h3>` elements.
fn parse_headlines(html: &str, limit: usize) -> Vec<Document> {
    let document = Html::parse_document(html);
    document
        .select(&HEADLINE)
        .take(limit)
        .map(|h| element_text(h, " "))
        .filter(|title| !title.is_empty())
        .map(|title| Document::new(title.clone(), SOURCE_NAME, title, Language::Ko))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines_become_documents() {
        let html = "<h3><a href=\"/a\">비트코인 <em>신고가</em></a></h3><h3>  </h3><h3>이더리움 반등</h3>";
        let docs = parse_headlines(html, 15);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title, "비트코인 신고가");
        assert_eq!(docs[0].raw_text, docs[0].title);
        assert_eq!(docs[1].title, "이더리움 반등");
    }

    #[test]
    fn test_limit_counts_empty_headlines() {
        let html = "<h3></h3><h3>one</h3><h3>two</h3>";
        let docs = parse_headlines(html, 2);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "one");
    }
}

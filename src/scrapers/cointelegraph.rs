//! Cointelegraph RSS feed (English).

use super::body::element_text;
use super::{get_text, rss};
use crate::config::SourcesConfig;
use crate::models::{Document, Language};
use reqwest::Client;
use scraper::Html;
use std::error::Error;
use tracing::instrument;

#[instrument(level = "info", skip_all)]
pub async fn fetch_documents(
    client: &Client,
    config: &SourcesConfig,
) -> Result<Vec<Document>, Box<dyn Error>> {
    let xml = get_text(client, &config.cointelegraph_url).await?;
    parse_feed(&xml, config.cointelegraph_limit)
}

/// First `limit` items; the HTML description is flattened to text.
fn parse_feed(xml: &str, limit: usize) -> Result<Vec<Document>, Box<dyn Error>> {
    Ok(rss::parse_items(xml)?
        .into_iter()
        .take(limit)
        .map(|item| {
            let fragment = Html::parse_fragment(&item.description);
            let text = element_text(fragment.root_element(), " ");
            let document = Document::new(item.title, "Cointelegraph", text, Language::En);
            if item.link.is_empty() {
                document
            } else {
                document.with_url(item.link)
            }
        })
        .collect())
}

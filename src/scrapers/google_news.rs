//! Google News RSS search for Korean crypto coverage.
//!
//! Feed links are relative (`./articles/...`) and resolved against the
//! Google News base URL. Each article body is fetched; when the body is too
//! thin to be useful, the headline stands in as the raw text.

use super::{NewsDesk, get_text, rss};
use crate::models::{Document, Language};
use crate::text::char_len;
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, instrument, warn};
use url::Url;

const SOURCE_NAME: &str = "Google News KR";

/// Search feed URL: query terms OR-ed together, Korean locale.
pub fn search_url(base: &str, terms: &[String]) -> String {
    let query = terms.iter().map(|t| urlencoding::encode(t)).join("+OR+");
    format!(
        "{}/rss/search?q={query}&hl=ko&gl=KR&ceid=KR:ko",
        base.trim_end_matches('/')
    )
}

#[instrument(level = "info", skip_all)]
pub async fn fetch_documents(desk: &NewsDesk) -> Result<Vec<Document>, Box<dyn Error>> {
    let base = Url::parse(&desk.sources.google_news_base)?;
    let feed_url = search_url(base.as_str(), &desk.sources.google_news_query);
    let xml = get_text(&desk.client, &feed_url).await?;
    let items = rss::parse_items(&xml)?;

    let mut documents = Vec::new();
    for item in items.into_iter().take(desk.sources.google_news_limit) {
        let url = match base.join(&item.link) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(link = %item.link, error = %e, "Unresolvable article link; skipping item");
                continue;
            }
        };
        let body = desk.article_body(&url).await;
        let raw_text = if char_len(&body) > desk.fetch.min_usable_body_chars {
            body
        } else {
            debug!(%url, chars = char_len(&body), "Body too short; using title");
            item.title.clone()
        };
        documents.push(Document::new(item.title, SOURCE_NAME, raw_text, Language::Ko).with_url(url));
    }
    Ok(documents)
}

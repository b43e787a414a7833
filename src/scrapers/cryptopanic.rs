//! CryptoPanic public posts API (English).

use super::get_text;
use crate::config::SourcesConfig;
use crate::models::{Document, Language};
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use tracing::instrument;
use url::Url;

#[derive(Debug, Deserialize)]
struct Posts {
    #[serde(default)]
    results: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    source: PostSource,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostSource {
    title: String,
}

/// Fetch public posts. The raw text is the description, or the title when
/// there is none.
#[instrument(level = "info", skip_all)]
pub async fn fetch_documents(
    client: &Client,
    config: &SourcesConfig,
) -> Result<Vec<Document>, Box<dyn Error>> {
    let url = Url::parse_with_params(
        &config.cryptopanic_url,
        &[("auth_token", config.cryptopanic_token.as_str()), ("public", "true")],
    )?;
    let body = get_text(client, url.as_str()).await?;
    parse_posts(&body)
}

fn parse_posts(body: &str) -> Result<Vec<Document>, Box<dyn Error>> {
    let posts: Posts = serde_json::from_str(body)?;
    Ok(posts
        .results
        .into_iter()
        .map(|post| {
            let raw_text = post
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| post.title.clone());
            let document = Document::new(post.title, post.source.title, raw_text, Language::En);
            match post.url {
                Some(url) => document.with_url(url),
                None => document,
            }
        })
        .collect())
}

//! News ingestion: turns crypto news sources into [`Document`]s.
//!
//! | Source | Module | Method | Language |
//! |--------|--------|--------|----------|
//! | CryptoPanic | [`cryptopanic`] | public posts JSON API | en |
//! | Cointelegraph | [`cointelegraph`] | RSS | en |
//! | Google News KR | [`google_news`] | RSS search + article body fetch | ko |
//! | Coindesk Korea | [`coindesk`] | `<h3>` headlines from HTML | ko |
//!
//! Sources run one after another. A failing source is logged and
//! contributes nothing; it never aborts the render. Feed results and
//! article bodies go through a [`TtlCache`] before touching the network.

pub mod body;
pub mod coindesk;
pub mod cointelegraph;
pub mod cryptopanic;
pub mod google_news;
pub mod rss;

use crate::cache::{CacheKey, CacheKind, TtlCache};
use crate::config::{Config, FetchConfig, SourcesConfig};
use crate::models::Document;
use body::BodyExtractor;
use reqwest::Client;
use std::error::Error;
use std::fmt;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    CryptoPanic,
    Cointelegraph,
    GoogleNews,
    Coindesk,
}

impl Source {
    pub fn name(self) -> &'static str {
        match self {
            Source::CryptoPanic => "cryptopanic",
            Source::Cointelegraph => "cointelegraph",
            Source::GoogleNews => "google_news",
            Source::Coindesk => "coindesk",
        }
    }

    /// Sources switched on in `config`, in fetch order.
    pub fn enabled(config: &SourcesConfig) -> Vec<Source> {
        [
            (Source::CryptoPanic, config.cryptopanic),
            (Source::Cointelegraph, config.cointelegraph),
            (Source::GoogleNews, config.google_news),
            (Source::Coindesk, config.coindesk),
        ]
        .into_iter()
        .filter_map(|(s, on)| on.then_some(s))
        .collect()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP client, ingestion settings, and the caches that outlive a render.
pub struct NewsDesk {
    client: Client,
    sources: SourcesConfig,
    fetch: FetchConfig,
    body: BodyExtractor,
    feeds: TtlCache<Vec<Document>>,
    bodies: TtlCache<String>,
}

impl NewsDesk {
    /// Build the desk. Every request made through it is bounded by
    /// `fetch.timeout_secs`.
    pub fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .timeout(config.fetch.timeout())
            .user_agent(config.fetch.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            sources: config.sources.clone(),
            fetch: config.fetch.clone(),
            body: BodyExtractor {
                min_chars: config.fetch.min_body_chars,
                fallback_max_chars: config.fetch.fallback_max_chars,
            },
            feeds: TtlCache::new(CacheKind::NewsFeed, &config.cache),
            bodies: TtlCache::new(CacheKind::ArticleBody, &config.cache),
        })
    }

    /// Collect documents from every enabled source, in source order.
    #[instrument(level = "info", skip_all)]
    pub async fn load_news_all(&self) -> Vec<Document> {
        let mut documents = Vec::new();
        for source in Source::enabled(&self.sources) {
            documents.extend(self.load_source(source).await);
        }
        info!(count = documents.len(), "Loaded news documents");
        documents
    }

    async fn load_source(&self, source: Source) -> Vec<Document> {
        let key = CacheKey::new("news_feed", source.name());
        if let Some(documents) = self.feeds.get(&key) {
            debug!(%source, count = documents.len(), "News feed cache hit");
            return documents;
        }

        let result = match source {
            Source::CryptoPanic => cryptopanic::fetch_documents(&self.client, &self.sources).await,
            Source::Cointelegraph => {
                cointelegraph::fetch_documents(&self.client, &self.sources).await
            }
            Source::GoogleNews => google_news::fetch_documents(self).await,
            Source::Coindesk => coindesk::fetch_documents(&self.client, &self.sources).await,
        };

        match result {
            Ok(documents) => {
                info!(%source, count = documents.len(), "Fetched news source");
                self.feeds.insert(key, documents.clone());
                documents
            }
            Err(e) => {
                warn!(%source, error = %e, "News source failed; skipping");
                Vec::new()
            }
        }
    }

    /// Article body for `url`, from cache when fresh. `""` on failure.
    /// Failures are not cached.
    pub async fn article_body(&self, url: &str) -> String {
        let key = CacheKey::new("article_body", url);
        if let Some(body) = self.bodies.get(&key) {
            return body;
        }
        let body = self.body.fetch(&self.client, url).await;
        if !body.is_empty() {
            self.bodies.insert(key, body.clone());
        }
        body
    }
}

/// GET `url` and return the body text; non-2xx statuses are errors.
pub async fn get_text(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("unexpected status {status} from {url}").into());
    }
    Ok(response.text().await?)
}


#[cfg(test)]
mod tests {
    use super::test_support::serve;
    use super::*;
    use axum::{Router, routing::get};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FEED: &str = r#"<rss><channel>
        <item><title>Bitcoin steady</title><link>https://example.com/1</link>
        <description>&lt;p&gt;Bitcoin held its range.&lt;/p&gt;</description></item>
    </channel></rss>"#;

    fn only_cointelegraph(url: String) -> Config {
        let mut config = Config::default();
        config.sources = SourcesConfig {
            cryptopanic: false,
            cointelegraph: true,
            cointelegraph_url: url,
            google_news: false,
            coindesk: false,
            ..SourcesConfig::default()
        };
        config
    }

    #[test]
    fn test_enabled_sources_in_order() {
        let mut config = SourcesConfig::default();
        assert_eq!(
            Source::enabled(&config),
            vec![Source::CryptoPanic, Source::Cointelegraph, Source::GoogleNews, Source::Coindesk]
        );
        config.google_news = false;
        assert!(!Source::enabled(&config).contains(&Source::GoogleNews));
    }

    #[tokio::test]
    async fn test_feed_cached_between_renders() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/rss",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    FEED
                }
            }),
        );
        let addr = serve(app).await;

        let desk = NewsDesk::new(&only_cointelegraph(format!("http://{addr}/rss"))).unwrap();
        let first = desk.load_news_all().await;
        let second = desk.load_news_all().await;
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_source_contributes_nothing() {
        let desk = NewsDesk::new(&only_cointelegraph("http://127.0.0.1:9/rss".to_string())).unwrap();
        assert!(desk.load_news_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_text_rejects_error_status() {
        let app = Router::new().route(
            "/down",
            get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let addr = serve(app).await;
        let client = Client::new();
        assert!(get_text(&client, &format!("http://{addr}/down")).await.is_err());
    }
}

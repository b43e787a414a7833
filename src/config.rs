//! Pipeline configuration loaded from YAML.
//!
//! Every field has a default, so a missing file or an empty document gives
//! the stock behaviour.
//!
//! ```yaml
//! summary:
//!   method: textrank
//!   max_sentences: 3
//! rank:
//!   iterations: 50
//!   tolerance: 0.000001
//! topics:
//!   n_clusters: 4
//! ```

use crate::text::cluster::TopicClusterer;
use crate::text::summarize::{LengthSummarizer, TextRankSummarizer};
use crate::text::textrank::RankParams;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryConfig,
    pub rank: RankConfig,
    pub keywords: KeywordConfig,
    pub topics: TopicConfig,
    pub fetch: FetchConfig,
    pub sources: SourcesConfig,
    pub cache: CacheConfig,
}

impl Config {
    /// Load from `path`, or defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&raw)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, Box<dyn Error>> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn rank_params(&self) -> RankParams {
        RankParams {
            damping: self.rank.damping,
            iterations: self.rank.iterations,
            tolerance: self.rank.tolerance,
            epsilon: self.rank.epsilon,
        }
    }

    pub fn textrank_summarizer(&self) -> TextRankSummarizer {
        TextRankSummarizer {
            max_sentences: self.summary.max_sentences,
            min_text_chars: self.summary.min_text_chars,
            min_sentence_chars: self.summary.min_sentence_chars,
            rank: self.rank_params(),
        }
    }

    pub fn length_summarizer(&self) -> LengthSummarizer {
        LengthSummarizer {
            max_sentences: self.summary.max_sentences,
            length_threshold: self.summary.length_threshold,
            max_chars: self.summary.max_chars,
        }
    }

    pub fn topic_clusterer(&self) -> TopicClusterer {
        let t = &self.topics;
        TopicClusterer {
            n_clusters: t.n_clusters,
            docs_per_cluster: t.docs_per_cluster,
            min_documents: t.min_documents,
            max_features: t.max_features,
            seed: t.seed,
            n_init: t.n_init,
            max_iter: t.max_iter,
            tolerance: t.tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    /// Graph-ranked sentences in source order.
    #[default]
    TextRank,
    /// Longest sentences first.
    Length,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub method: SummaryMethod,
    pub max_sentences: usize,
    pub min_text_chars: usize,
    pub min_sentence_chars: usize,
    pub length_threshold: usize,
    pub max_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            method: SummaryMethod::TextRank,
            max_sentences: 3,
            min_text_chars: 40,
            min_sentence_chars: 10,
            length_threshold: 120,
            max_chars: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RankConfig {
    pub damping: f64,
    pub iterations: usize,
    pub tolerance: Option<f64>,
    pub epsilon: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        let p = RankParams::default();
        Self {
            damping: p.damping,
            iterations: p.iterations,
            tolerance: p.tolerance,
            epsilon: p.epsilon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub top_k: usize,
    pub min_text_chars: usize,
    pub max_features: usize,
    /// Try the embedding extractor first when it is compiled in.
    pub embeddings: bool,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_text_chars: 20,
            max_features: 200,
            embeddings: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TopicConfig {
    pub n_clusters: usize,
    pub docs_per_cluster: usize,
    pub min_documents: usize,
    pub max_features: usize,
    pub seed: u64,
    pub n_init: usize,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for TopicConfig {
    fn default() -> Self {
        let c = TopicClusterer::default();
        Self {
            n_clusters: c.n_clusters,
            docs_per_cluster: c.docs_per_cluster,
            min_documents: c.min_documents,
            max_features: c.max_features,
            seed: c.seed,
            n_init: c.n_init,
            max_iter: c.max_iter,
            tolerance: c.tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    /// A selector match must carry more than this many characters to win.
    pub min_body_chars: usize,
    /// Cap on the paragraph fallback.
    pub fallback_max_chars: usize,
    /// Fetched bodies at or under this length are replaced by the title.
    pub min_usable_body_chars: usize,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            min_body_chars: 150,
            fallback_max_chars: 2000,
            min_usable_body_chars: 100,
            user_agent: concat!("chainradar/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub cryptopanic: bool,
    pub cryptopanic_url: String,
    /// Overridden by `--cryptopanic-token` / `CRYPTOPANIC_TOKEN`.
    pub cryptopanic_token: String,
    pub cointelegraph: bool,
    pub cointelegraph_url: String,
    pub cointelegraph_limit: usize,
    pub google_news: bool,
    pub google_news_base: String,
    pub google_news_query: Vec<String>,
    pub google_news_limit: usize,
    pub coindesk: bool,
    pub coindesk_url: String,
    pub coindesk_limit: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            cryptopanic: true,
            cryptopanic_url: "https://cryptopanic.com/api/v1/posts/".to_string(),
            cryptopanic_token: String::new(),
            cointelegraph: true,
            cointelegraph_url: "https://cointelegraph.com/rss".to_string(),
            cointelegraph_limit: 10,
            google_news: true,
            google_news_base: "https://news.google.com/".to_string(),
            google_news_query: vec![
                "암호화폐".to_string(),
                "비트코인".to_string(),
                "블록체인".to_string(),
            ],
            google_news_limit: 40,
            coindesk: true,
            coindesk_url: "https://www.coindesk.com/ko".to_string(),
            coindesk_limit: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub news_ttl_secs: u64,
    pub body_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            news_ttl_secs: 1800,
            body_ttl_secs: 1800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml(
            "summary:\n  method: length\nrank:\n  tolerance: 0.0001\ntopics:\n  n_clusters: 2\n",
        )
        .unwrap();
        assert_eq!(config.summary.method, SummaryMethod::Length);
        assert_eq!(config.summary.max_sentences, 3);
        assert_eq!(config.rank.tolerance, Some(0.0001));
        assert_eq!(config.rank.iterations, 20);
        assert_eq!(config.topics.n_clusters, 2);
        assert_eq!(config.topics.seed, 42);
        assert_eq!(config.fetch.timeout_secs, 5);
    }

    #[test]
    fn test_bad_yaml_is_error() {
        assert!(Config::from_yaml("summary: [not, a, map]").is_err());
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "keywords:\n  top_k: 8\n  embeddings: false\n").unwrap();
        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.keywords.top_k, 8);
        assert!(!config.keywords.embeddings);
    }

    #[test]
    fn test_builders_carry_values() {
        let mut config = Config::default();
        config.summary.max_sentences = 2;
        config.rank.damping = 0.5;
        assert_eq!(config.textrank_summarizer().max_sentences, 2);
        assert_eq!(config.textrank_summarizer().rank.damping, 0.5);
        assert_eq!(config.topic_clusterer(), TopicClusterer::default());
    }
}

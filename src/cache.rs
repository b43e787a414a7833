//! In-memory cache keyed by operation and arguments, with a TTL per kind.
//!
//! Ingestion consults it before any network fetch so that repeated renders
//! in watch mode reuse recent feeds and article bodies. Expiry is handled by
//! `moka`; an entry older than its kind's TTL is never returned.

use crate::config::CacheConfig;
use moka::sync::Cache;
use std::time::Duration;

/// Upper bound on entries per cache.
const MAX_ENTRIES: u64 = 10_000;

/// Kind of cached operation; each kind has its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    NewsFeed,
    ArticleBody,
}

impl CacheKind {
    pub fn ttl(self, config: &CacheConfig) -> Duration {
        match self {
            CacheKind::NewsFeed => Duration::from_secs(config.news_ttl_secs),
            CacheKind::ArticleBody => Duration::from_secs(config.body_ttl_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub operation: &'static str,
    pub args: String,
}

impl CacheKey {
    pub fn new(operation: &'static str, args: impl Into<String>) -> Self {
        Self {
            operation,
            args: args.into(),
        }
    }
}

/// Values of one [`CacheKind`], each living for that kind's TTL.
pub struct TtlCache<V> {
    entries: Cache<CacheKey, V>,
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    pub fn new(kind: CacheKind, config: &CacheConfig) -> Self {
        Self::with_ttl(kind.ttl(config))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { entries }
    }

    /// A clone of the live value for `key`.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.entries.get(key)
    }

    pub fn insert(&self, key: CacheKey, value: V) {
        self.entries.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache = TtlCache::with_ttl(Duration::from_secs(60));
        let key = CacheKey::new("body", "https://example.com/a");
        cache.insert(key.clone(), "text".to_string());
        assert_eq!(cache.get(&key), Some("text".to_string()));
    }

    #[test]
    fn test_args_distinguish_entries() {
        let cache = TtlCache::with_ttl(Duration::from_secs(60));
        cache.insert(CacheKey::new("body", "a"), 1);
        assert_eq!(cache.get(&CacheKey::new("body", "b")), None);
        assert_eq!(cache.get(&CacheKey::new("feed", "a")), None);
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let cache = TtlCache::with_ttl(Duration::from_millis(50));
        let key = CacheKey::new("feed", "cointelegraph");
        cache.insert(key.clone(), vec![1, 2]);
        assert_eq!(cache.get(&key), Some(vec![1, 2]));
        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get(&key), None);
    }

    #[test]
    fn test_cache_built_from_kind_ttl() {
        let config = CacheConfig {
            news_ttl_secs: 0,
            body_ttl_secs: 60,
        };
        let feeds = TtlCache::new(CacheKind::NewsFeed, &config);
        let bodies = TtlCache::new(CacheKind::ArticleBody, &config);
        let key = CacheKey::new("news_feed", "coindesk");
        feeds.insert(key.clone(), 1);
        bodies.insert(key.clone(), 2);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(feeds.get(&key), None);
        assert_eq!(bodies.get(&key), Some(2));
    }

    #[test]
    fn test_ttl_per_kind() {
        let config = CacheConfig {
            news_ttl_secs: 1800,
            body_ttl_secs: 60,
        };
        assert_eq!(CacheKind::NewsFeed.ttl(&config), Duration::from_secs(1800));
        assert_eq!(CacheKind::ArticleBody.ttl(&config), Duration::from_secs(60));
    }
}

use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::CacheSettings;
use crate::models::SearchResult;

#[derive(Debug, Clone)]
struct MemoryEntry {
    results: Vec<SearchResult>,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub total_requests: AtomicU64,
    pub memory_hits: AtomicU64,
}

/// Answers for recently seen queries, keyed by [`crate::utils::search_cache_key`].
#[derive(Clone)]
pub struct CacheService {
    settings: CacheSettings,
    memory_cache: Arc<Mutex<LruCache<String, MemoryEntry>>>,
    stats: Arc<CacheStats>,
}

impl CacheService {
    pub fn new(settings: CacheSettings) -> Self {
        let memory_capacity = NonZeroUsize::new(settings.memory_cache_entries.max(1))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            settings,
            memory_cache: Arc::new(Mutex::new(LruCache::new(memory_capacity))),
            stats: Arc::new(CacheStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<CacheStats> {
        self.stats.clone()
    }

    pub async fn len(&self) -> usize {
        self.memory_cache.lock().await.len()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);

        let mut cache = self.memory_cache.lock().await;
        if let Some(entry) = cache.get(key) {
            if entry.expires_at > Utc::now() {
                self.stats.memory_hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.results.clone());
            }
        }
        cache.pop(key);
        None
    }

    pub async fn set(&self, key: &str, results: Vec<SearchResult>) {
        let expires_at = Utc::now() + Duration::seconds(self.settings.memory_ttl_seconds as i64);
        let mut cache = self.memory_cache.lock().await;
        cache.put(
            key.to_string(),
            MemoryEntry {
                results,
                expires_at,
            },
        );
    }
}

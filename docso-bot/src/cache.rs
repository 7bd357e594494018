//! Index cache for avoiding redundant fetches

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use docso_core::DocIndex;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::config::CacheConfig;
use crate::error::BotResult;
use crate::transport::IndexProvider;

/// Longest TTL honoured; larger settings are clamped
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// A cached package index
#[derive(Debug, Clone)]
pub struct CachedIndex {
    pub index: Arc<DocIndex>,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedIndex {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entry_count: usize,
    pub hits: u64,
    pub misses: u64,
    /// Hit rate (0.0 - 1.0)
    pub hit_rate: f64,
    pub evictions: u64,
}

/// Package name → index, with expiry and a size cap
pub struct IndexCache {
    config: CacheConfig,
    entries: RwLock<HashMap<String, CachedIndex>>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl IndexCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, package: &str) -> Option<Arc<DocIndex>> {
        if !self.config.enabled {
            self.misses.fetch_add(1, Ordering::SeqCst);
            return None;
        }

        let entries = self.entries.read().await;
        if let Some(cached) = entries.get(package) {
            if !cached.is_expired() {
                self.hits.fetch_add(1, Ordering::SeqCst);
                return Some(Arc::clone(&cached.index));
            }
        }

        self.misses.fetch_add(1, Ordering::SeqCst);
        None
    }

    pub async fn set(&self, package: &str, index: Arc<DocIndex>) {
        if !self.config.enabled || self.config.max_entries == 0 {
            return;
        }

        let now = Utc::now();
        let ttl = Duration::seconds(self.config.ttl_secs.min(MAX_TTL_SECS) as i64);
        let expires_at = now + ttl;

        let mut entries = self.entries.write().await;

        if entries.len() >= self.config.max_entries && !entries.contains_key(package) {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, v)| v.fetched_at)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::SeqCst);
            }
        }

        entries.insert(
            package.to_string(),
            CachedIndex {
                index,
                fetched_at: now,
                expires_at,
            },
        );
    }

    pub async fn stats(&self) -> CacheStats {
        let entry_count = self.entries.read().await.len();
        let hits = self.hits.load(Ordering::SeqCst);
        let misses = self.misses.load(Ordering::SeqCst);
        let total = hits + misses;

        CacheStats {
            entry_count,
            hits,
            misses,
            hit_rate: if total > 0 { hits as f64 / total as f64 } else { 0.0 },
            evictions: self.evictions.load(Ordering::SeqCst),
        }
    }

    /// Remove expired entries; returns how many went
    pub async fn evict_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        let before = entries.len();
        entries.retain(|_, v| v.expires_at > now);

        let removed = before - entries.len();
        self.evictions.fetch_add(removed as u64, Ordering::SeqCst);
        removed
    }
}

/// Wraps a provider so repeated lookups of a package skip the fetch
pub struct CachedIndexProvider<P> {
    inner: P,
    cache: IndexCache,
}

impl<P: IndexProvider> CachedIndexProvider<P> {
    pub fn new(inner: P, config: CacheConfig) -> Self {
        Self {
            inner,
            cache: IndexCache::new(config),
        }
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }
}

#[async_trait]
impl<P: IndexProvider> IndexProvider for CachedIndexProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch_index(&self, package: &str) -> BotResult<Arc<DocIndex>> {
        if let Some(index) = self.cache.get(package).await {
            tracing::debug!(package, "index cache hit");
            return Ok(index);
        }

        let index = self.inner.fetch_index(package).await?;
        self.cache.set(package, Arc::clone(&index)).await;
        Ok(index)
    }

    async fn evict_expired(&self) -> usize {
        let evicted = self.cache.evict_expired().await + self.inner.evict_expired().await;
        if evicted > 0 {
            tracing::debug!(evicted, "expired indexes dropped");
        }
        evicted
    }
}

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// A complete serialized JSON response, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub body: String,
}

impl CachedResponse {
    pub fn json(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

#[derive(Debug)]
struct CacheEntry {
    response: CachedResponse,
    cached_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

/// Process-wide in-memory response cache keyed by request path.
///
/// Entries expire after their TTL and the least recently used entry is
/// evicted once `capacity` is reached. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl ResponseCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Return the fresh entry for `key`, dropping it if it has expired.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!(age = ?entry.cached_at.elapsed(), "cache hit");
                Some(entry.response.clone())
            }
            Some(entry) => {
                debug!(
                    age = ?entry.cached_at.elapsed(),
                    ttl = ?entry.ttl,
                    "removing expired cache entry"
                );
                entries.pop(key);
                None
            }
            None => {
                debug!("cache miss");
                None
            }
        }
    }

    pub async fn insert(&self, key: String, response: CachedResponse, ttl: Duration) {
        let entry = CacheEntry {
            response,
            cached_at: Instant::now(),
            ttl,
        };
        self.entries.write().await.put(key, entry);
    }

    /// Serve `key` from the cache, or run `compute` and store its result.
    ///
    /// The lock is not held while computing, so concurrent misses may both
    /// compute; the last one to finish wins.
    pub async fn get_or_compute<C, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: C,
    ) -> CachedResponse
    where
        C: FnOnce() -> Fut,
        Fut: Future<Output = CachedResponse>,
    {
        if let Some(response) = self.get(key).await {
            return response;
        }
        let response = compute().await;
        self.insert(key.to_string(), response.clone(), ttl).await;
        response
    }
}

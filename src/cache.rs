//! Time-boxed memoization of fetch results, kept outside the fetcher itself.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::earnings::{EarningsSource, FetchResult, ProviderId, normalize_ticker};

/// Default lifetime of a cached result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Defines how a [`CachedFetcher`] treats its store for a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read from the cache if a non-expired entry is present; otherwise, fetch
    /// and write the result to the cache. (Default)
    #[default]
    Use,
    /// Always fetch, bypassing any cached entry, and write the new result to the cache.
    Refresh,
    /// Always fetch and do not read from or write to the cache.
    Bypass,
}

#[derive(Debug)]
struct CacheEntry {
    value: FetchResult,
    expires_at: Instant,
}

type CacheKey = (String, ProviderId);

/// Wraps an [`EarningsSource`] with an in-memory `(ticker, provider)` cache.
///
/// Only `Events` and `Empty` are stored; rate limits, missing credentials and
/// errors are always retried on the next call. Concurrent misses for the same key
/// each reach the inner source and the last write wins.
#[derive(Debug)]
pub struct CachedFetcher<S> {
    inner: S,
    ttl: Duration,
    mode: CacheMode,
    map: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl<S: EarningsSource> CachedFetcher<S> {
    /// Caches results of `inner` for [`DEFAULT_TTL`].
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    /// Caches results of `inner` for `ttl`.
    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            mode: CacheMode::Use,
            map: RwLock::new(HashMap::new()),
        }
    }

    /// Sets the cache mode for subsequent calls.
    #[must_use]
    pub fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.mode = mode;
        self
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Fetches through the cache.
    pub async fn fetch(&self, ticker: &str, provider: ProviderId) -> FetchResult {
        let key = (normalize_ticker(ticker), provider);

        if self.mode == CacheMode::Use
            && let Some(hit) = self.get(&key).await
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(ticker = %key.0, %provider, "earnings cache hit");
            return hit;
        }

        let value = self.inner.fetch_earnings(&key.0, provider).await;

        if self.mode != CacheMode::Bypass && cacheable(&value) {
            self.put(key, value.clone()).await;
        }
        value
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.map.write().await.clear();
    }

    /// Drops expired entries.
    pub async fn purge_expired(&self) {
        let now = Instant::now();
        self.map.write().await.retain(|_, e| e.expires_at > now);
    }

    async fn get(&self, key: &CacheKey) -> Option<FetchResult> {
        let guard = self.map.read().await;
        let entry = guard.get(key)?;
        (Instant::now() <= entry.expires_at).then(|| entry.value.clone())
    }

    async fn put(&self, key: CacheKey, value: FetchResult) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.map.write().await.insert(key, entry);
    }
}

impl<S: EarningsSource> EarningsSource for CachedFetcher<S> {
    fn fetch_earnings<'a>(
        &'a self,
        ticker: &'a str,
        provider: ProviderId,
    ) -> Pin<Box<dyn Future<Output = FetchResult> + Send + 'a>> {
        Box::pin(self.fetch(ticker, provider))
    }
}

fn cacheable(value: &FetchResult) -> bool {
    matches!(value, FetchResult::Events(_) | FetchResult::Empty)
}

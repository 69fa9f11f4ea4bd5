use serde::{Deserialize, Serialize};

use crate::{Cache, Error, Result};


/// Eviction policy applied to a cache after every mutation.
///
/// A limiter must not evict an entry with an in-flight request if the caller relies on the
/// request's result. Evicting one anyway is safe: the later receive is ignored.
pub trait Limiter<K, V, M> {
    fn limit(&self, cache: Cache<K, V, M>) -> Cache<K, V, M>;
}

impl<K, V, M, F> Limiter<K, V, M> for F
where
    F: Fn(Cache<K, V, M>) -> Cache<K, V, M>,
{
    fn limit(&self, cache: Cache<K, V, M>) -> Cache<K, V, M> {
        self(cache)
    }
}

/// [`Limiter`] that never evicts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl<K, V, M> Limiter<K, V, M> for Unlimited {
    fn limit(&self, cache: Cache<K, V, M>) -> Cache<K, V, M> {
        cache
    }
}

/// [`Limiter`] that bounds the number of entries by evicting the least recently written settled
/// entries.
///
/// In-flight entries count toward the bound but are never evicted, so settled entries go first
/// and the cache can grow beyond the bound while more requests than the bound are in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxEntries(usize);

impl MaxEntries {
    pub fn new(max: usize) -> Result<Self> {
        if max == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self(max))
    }
    pub fn max(&self) -> usize {
        self.0
    }
}

impl<K: Clone, V: Clone, M: Clone> Limiter<K, V, M> for MaxEntries {
    fn limit(&self, cache: Cache<K, V, M>) -> Cache<K, V, M> {
        let mut excess = cache.len().saturating_sub(self.0);
        if excess == 0 {
            return cache;
        }
        let before = cache.len();
        let cache = cache.retain(|e| {
            if excess > 0 && !e.is_in_flight() {
                excess -= 1;
                false
            } else {
                true
            }
        });
        let evicted = before - cache.len();
        if evicted > 0 {
            tracing::debug!(evicted, max = self.0, "evicted settled cache entries");
        }
        cache
    }
}

/// Cache eviction settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Upper bound on the number of entries. Unbounded if absent.
    pub max_entries: Option<usize>,
}

impl CacheConfig {
    pub fn limiter(&self) -> Result<ConfiguredLimiter> {
        Ok(match self.max_entries {
            Some(max) => ConfiguredLimiter::MaxEntries(MaxEntries::new(max)?),
            None => ConfiguredLimiter::Unlimited,
        })
    }
}

/// [`Limiter`] built from a [`CacheConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguredLimiter {
    Unlimited,
    MaxEntries(MaxEntries),
}

impl<K: Clone, V: Clone, M: Clone> Limiter<K, V, M> for ConfiguredLimiter {
    fn limit(&self, cache: Cache<K, V, M>) -> Cache<K, V, M> {
        match self {
            Self::Unlimited => Unlimited.limit(cache),
            Self::MaxEntries(limiter) => limiter.limit(cache),
        }
    }
}

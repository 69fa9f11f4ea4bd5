use std::rc::Rc;

use derive_ex::Ex;

use crate::{
    AwaitValue, Cache, CacheAction, CacheId, Equality, GenericAction, Limiter, ReceiveValue,
};


/// Pure reduction of [`CacheAction`]s addressed to one cache.
///
/// Actions for other caches and unrelated actions leave the cache untouched. After each
/// transition the limiter is applied to the resulting cache.
#[derive(Ex)]
#[derive_ex(Clone(bound()))]
pub struct CacheReducer<K, V, M = ()> {
    cache_id: CacheId,
    keys_are_equal: Rc<dyn Equality<K>>,
    limiter: Rc<dyn Limiter<K, V, M>>,
}

impl<K, V, M> CacheReducer<K, V, M>
where
    K: Clone + 'static,
    V: Clone + 'static,
    M: Clone + 'static,
{
    pub fn new(
        cache_id: impl Into<CacheId>,
        keys_are_equal: impl Equality<K> + 'static,
        limiter: impl Limiter<K, V, M> + 'static,
    ) -> Self {
        Self::from_rc(cache_id.into(), Rc::new(keys_are_equal), Rc::new(limiter))
    }
    pub(crate) fn from_rc(
        cache_id: CacheId,
        keys_are_equal: Rc<dyn Equality<K>>,
        limiter: Rc<dyn Limiter<K, V, M>>,
    ) -> Self {
        Self {
            cache_id,
            keys_are_equal,
            limiter,
        }
    }

    pub fn cache_id(&self) -> &CacheId {
        &self.cache_id
    }

    /// Computes the next cache. `None` stands for a cache that has not been created yet.
    pub fn reduce(
        &self,
        cache: Option<&Cache<K, V, M>>,
        action: &impl GenericAction<K, V, M>,
    ) -> Cache<K, V, M> {
        let cache = cache.cloned().unwrap_or_default();
        match action.as_cache_action() {
            Some(action) if *action.cache_id() == self.cache_id => match action {
                CacheAction::AwaitValue(action) => self.reduce_await(cache, action),
                CacheAction::ReceiveValue(action) => self.reduce_receive(cache, action),
            },
            _ => cache,
        }
    }

    fn reduce_await(&self, cache: Cache<K, V, M>, action: &AwaitValue<K, M>) -> Cache<K, V, M> {
        let (cache, superseded) = cache.with_awaiting(
            action.key.clone(),
            action.request_id.clone(),
            action.meta.clone(),
            &*self.keys_are_equal,
        );
        if let Some(superseded) = superseded {
            tracing::debug!(
                cache_id = %self.cache_id,
                request_id = %action.request_id,
                %superseded,
                "superseded in-flight request"
            );
        }
        tracing::trace!(cache_id = %self.cache_id, request_id = %action.request_id, "await value");
        self.limiter.limit(cache)
    }

    fn reduce_receive(&self, cache: Cache<K, V, M>, action: &ReceiveValue<V>) -> Cache<K, V, M> {
        match cache.with_resolved(&action.request_id, action.value.clone()) {
            Ok(cache) => {
                tracing::trace!(
                    cache_id = %self.cache_id,
                    request_id = %action.request_id,
                    "receive value"
                );
                self.limiter.limit(cache)
            }
            Err(cache) => {
                tracing::debug!(
                    cache_id = %self.cache_id,
                    request_id = %action.request_id,
                    "ignored receive for unknown request"
                );
                cache
            }
        }
    }
}

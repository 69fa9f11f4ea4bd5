use std::{future::Future, rc::Rc};

use crate::{
    await_value, receive_value, AsyncValue, AwaitValue, Cache, CacheId, CacheLookup,
    CacheReducer, Equality, FetchCommand, GenericAction, Limiter, ReceiveValue, RequestId,
};


/// Derives the [`AsyncValue`] for `key`.
///
/// A received value is returned as is. A key with an in-flight request yields no commands, and a
/// key that is not in the cache yields `fallback`.
pub fn create_async_value<K, V, M, C>(
    cache: &Cache<K, V, M>,
    key: &K,
    keys_are_equal: &(impl Equality<K> + ?Sized),
    fallback: C,
) -> AsyncValue<C, V>
where
    V: Clone,
{
    match cache.lookup(key, keys_are_equal) {
        CacheLookup::Received(value) => AsyncValue::Received(value.clone()),
        CacheLookup::Awaiting => AsyncValue::none(),
        CacheLookup::Absent => AsyncValue::pending(fallback),
    }
}

/// Read access to one cache snapshot.
pub struct CacheApi<'a, K, V, M = ()> {
    cache_id: &'a CacheId,
    cache: &'a Cache<K, V, M>,
    keys_are_equal: &'a dyn Equality<K>,
}

pub fn cache_api<'a, K, V, M>(
    cache_id: &'a CacheId,
    cache: &'a Cache<K, V, M>,
    keys_are_equal: &'a dyn Equality<K>,
) -> CacheApi<'a, K, V, M> {
    CacheApi {
        cache_id,
        cache,
        keys_are_equal,
    }
}

impl<'a, K, V, M> CacheApi<'a, K, V, M> {
    pub fn cache(&self) -> &'a Cache<K, V, M> {
        self.cache
    }
    pub fn get_for(&self, key: K) -> CacheApiGetFor<'a, K, V, M> {
        CacheApiGetFor {
            cache_id: self.cache_id,
            cache: self.cache,
            keys_are_equal: self.keys_are_equal,
            key,
        }
    }
}

/// Read access to one key of a cache snapshot.
pub struct CacheApiGetFor<'a, K, V, M = ()> {
    cache_id: &'a CacheId,
    cache: &'a Cache<K, V, M>,
    keys_are_equal: &'a dyn Equality<K>,
    key: K,
}

impl<'a, K, V: Clone, M> CacheApiGetFor<'a, K, V, M> {
    pub fn value(&self) -> Option<&'a V> {
        match self.cache.lookup(&self.key, self.keys_are_equal) {
            CacheLookup::Received(value) => Some(value),
            CacheLookup::Absent | CacheLookup::Awaiting => None,
        }
    }

    /// Falls back to `command` if the key is not in the cache.
    pub fn or_else<C>(self, command: C) -> AsyncValue<C, V> {
        create_async_value(self.cache, &self.key, self.keys_are_equal, command)
    }

    /// Falls back to fetching the value with `producer` if the key is not in the cache.
    ///
    /// This only describes the fetch. Nothing runs until the returned command is executed.
    pub fn or_fetch<Fut>(
        self,
        producer: impl Fn() -> Fut + 'static,
    ) -> AsyncValue<FetchCommand<K, V, M>, V>
    where
        Fut: Future<Output = V> + 'static,
        V: 'static,
    {
        self.fetch_command(producer, None)
    }

    /// Same as [`or_fetch`](Self::or_fetch), attaching `meta` to the request.
    pub fn or_fetch_with<Fut>(
        self,
        producer: impl Fn() -> Fut + 'static,
        meta: M,
    ) -> AsyncValue<FetchCommand<K, V, M>, V>
    where
        Fut: Future<Output = V> + 'static,
        V: 'static,
    {
        self.fetch_command(producer, Some(meta))
    }

    fn fetch_command<Fut>(
        self,
        producer: impl Fn() -> Fut + 'static,
        meta: Option<M>,
    ) -> AsyncValue<FetchCommand<K, V, M>, V>
    where
        Fut: Future<Output = V> + 'static,
        V: 'static,
    {
        let Self {
            cache_id,
            cache,
            keys_are_equal,
            key,
        } = self;
        match cache.lookup(&key, keys_are_equal) {
            CacheLookup::Received(value) => AsyncValue::Received(value.clone()),
            CacheLookup::Awaiting => AsyncValue::none(),
            CacheLookup::Absent => {
                AsyncValue::pending(FetchCommand::new(cache_id.clone(), key, producer, meta))
            }
        }
    }
}

/// Everything needed to wire one cache into an application state container.
pub struct CacheDefinition<S, K, V, M = ()> {
    cache_selector: Rc<dyn Fn(&S) -> &Cache<K, V, M>>,
    keys_are_equal: Rc<dyn Equality<K>>,
    reducer: CacheReducer<K, V, M>,
}

impl<S, K, V, M> CacheDefinition<S, K, V, M>
where
    K: Clone + 'static,
    V: Clone + 'static,
    M: Clone + 'static,
{
    pub fn new(
        cache_id: impl Into<CacheId>,
        cache_selector: impl Fn(&S) -> &Cache<K, V, M> + 'static,
        keys_are_equal: impl Equality<K> + 'static,
        limiter: impl Limiter<K, V, M> + 'static,
    ) -> Self {
        let keys_are_equal: Rc<dyn Equality<K>> = Rc::new(keys_are_equal);
        Self {
            cache_selector: Rc::new(cache_selector),
            reducer: CacheReducer::from_rc(
                cache_id.into(),
                keys_are_equal.clone(),
                Rc::new(limiter),
            ),
            keys_are_equal,
        }
    }

    pub fn cache_id(&self) -> &CacheId {
        self.reducer.cache_id()
    }
    pub fn keys_are_equal(&self) -> &dyn Equality<K> {
        &*self.keys_are_equal
    }
    pub fn reducer(&self) -> &CacheReducer<K, V, M> {
        &self.reducer
    }

    /// Selects this cache from the application state.
    pub fn cache<'a>(&self, app_state: &'a S) -> &'a Cache<K, V, M> {
        (self.cache_selector)(app_state)
    }

    pub fn selector<'a>(&'a self, app_state: &'a S) -> CacheApi<'a, K, V, M> {
        cache_api(self.cache_id(), self.cache(app_state), self.keys_are_equal())
    }

    pub fn reduce(
        &self,
        cache: Option<&Cache<K, V, M>>,
        action: &impl GenericAction<K, V, M>,
    ) -> Cache<K, V, M> {
        self.reducer.reduce(cache, action)
    }

    pub fn await_value(&self, key: K, request_id: RequestId, meta: Option<M>) -> AwaitValue<K, M> {
        await_value(self.cache_id().clone(), key, request_id, meta)
    }
    pub fn receive_value(&self, request_id: RequestId, value: V) -> ReceiveValue<V> {
        receive_value(self.cache_id().clone(), request_id, value)
    }
}

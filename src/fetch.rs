use std::{fmt, future::Future, rc::Rc};

use derive_ex::Ex;
use futures::{
    future::LocalBoxFuture,
    task::{LocalSpawn, LocalSpawnExt},
    FutureExt,
};

use crate::{
    await_value, receive_value, AwaitValue, CacheAction, CacheId, CommandExecutor, Error,
    RequestId, RequestIdGenerator, Result,
};


/// Delivers actions to the external state container.
pub trait Dispatch<A> {
    fn dispatch(&self, action: A);
}

impl<A, F: Fn(A)> Dispatch<A> for F {
    fn dispatch(&self, action: A) {
        self(action)
    }
}

/// Command that resolves a cache entry by running an asynchronous producer.
///
/// Creating a `FetchCommand` has no effect; it only describes how a value would be obtained.
/// The producer runs when the command is executed, typically by a [`FetchExecutor`].
#[derive(Ex)]
#[derive_ex(Clone(bound(K, M)))]
pub struct FetchCommand<K, V, M = ()> {
    cache_id: CacheId,
    key: K,
    producer: Rc<dyn Fn() -> LocalBoxFuture<'static, V>>,
    meta: Option<M>,
}

impl<K, V: 'static, M> FetchCommand<K, V, M> {
    pub fn new<Fut>(
        cache_id: CacheId,
        key: K,
        producer: impl Fn() -> Fut + 'static,
        meta: Option<M>,
    ) -> Self
    where
        Fut: Future<Output = V> + 'static,
    {
        Self {
            cache_id,
            key,
            producer: Rc::new(move || producer().boxed_local()),
            meta,
        }
    }

    pub fn cache_id(&self) -> &CacheId {
        &self.cache_id
    }
    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn meta(&self) -> Option<&M> {
        self.meta.as_ref()
    }

    /// Starts the producer.
    pub fn fetch(&self) -> LocalBoxFuture<'static, V> {
        (self.producer)()
    }

    /// Splits the command into the await action for `request_id` and the started producer.
    pub fn into_await(
        self,
        request_id: RequestId,
    ) -> (AwaitValue<K, M>, LocalBoxFuture<'static, V>) {
        let fetch = (self.producer)();
        (
            await_value(self.cache_id, self.key, request_id, self.meta),
            fetch,
        )
    }
}

impl<K: fmt::Debug, V, M: fmt::Debug> fmt::Debug for FetchCommand<K, V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchCommand")
            .field("cache_id", &self.cache_id)
            .field("key", &self.key)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Executes [`FetchCommand`]s.
///
/// Execution spawns the producer on `spawner`, then dispatches an [`AwaitValue`] for a fresh
/// request id synchronously. When the producer resolves, a [`ReceiveValue`](crate::ReceiveValue)
/// for the same request id is dispatched.
///
/// `spawner` must not poll the task before `spawn_local` returns, so the await is reduced before
/// the receive. If spawning fails nothing is dispatched and the key stays absent.
pub struct FetchExecutor<D, S> {
    dispatcher: Rc<D>,
    spawner: S,
    request_ids: RequestIdGenerator,
}

impl<D, S: LocalSpawn> FetchExecutor<D, S> {
    pub fn new(dispatcher: D, spawner: S) -> Self {
        Self {
            dispatcher: Rc::new(dispatcher),
            spawner,
            request_ids: RequestIdGenerator::new(),
        }
    }
    pub fn with_request_ids(self, request_ids: RequestIdGenerator) -> Self {
        Self {
            request_ids,
            ..self
        }
    }

    /// Starts `command` and returns the request id it was registered under.
    pub fn try_execute<K, V, M>(&self, command: FetchCommand<K, V, M>) -> Result<RequestId>
    where
        D: Dispatch<CacheAction<K, V, M>> + 'static,
        K: 'static,
        V: 'static,
        M: 'static,
    {
        let request_id = self.request_ids.next_id();
        let (action, fetch) = command.into_await(request_id.clone());
        let cache_id = action.cache_id.clone();

        let dispatcher = self.dispatcher.clone();
        let task_request_id = request_id.clone();
        self.spawner
            .spawn_local(async move {
                let value = fetch.await;
                let action = receive_value(cache_id, task_request_id, value);
                dispatcher.dispatch(CacheAction::<K, V, M>::from(action));
            })
            .map_err(|source| Error::Spawn {
                request_id: request_id.clone(),
                source,
            })?;

        tracing::trace!(cache_id = %action.cache_id, %request_id, "start fetch");
        self.dispatcher
            .dispatch(CacheAction::<K, V, M>::from(action));
        Ok(request_id)
    }
}

impl<K, V, M, D, S> CommandExecutor<FetchCommand<K, V, M>> for FetchExecutor<D, S>
where
    D: Dispatch<CacheAction<K, V, M>> + 'static,
    S: LocalSpawn,
    K: 'static,
    V: 'static,
    M: 'static,
{
    fn execute(&mut self, command: FetchCommand<K, V, M>) {
        if let Err(e) = self.try_execute(command) {
            tracing::error!(error = %e, "failed to start fetch");
        }
    }
}

use std::rc::Rc;

use parse_display::Display;
use serde::{Deserialize, Serialize};

use crate::RequestId;

/// Identifies a cache among all caches sharing one action channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{0}")]
#[serde(transparent)]
pub struct CacheId(Rc<str>);

impl CacheId {
    pub fn new(id: impl Into<Rc<str>>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<&str> for CacheId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
impl From<String> for CacheId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Registers `request_id` as the in-flight request for `key`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwaitValue<K, M = ()> {
    pub cache_id: CacheId,
    pub key: K,
    pub request_id: RequestId,
    pub meta: Option<M>,
}

/// Resolves the entry waiting on `request_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveValue<V> {
    pub cache_id: CacheId,
    pub request_id: RequestId,
    pub value: V,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheAction<K, V, M = ()> {
    AwaitValue(AwaitValue<K, M>),
    ReceiveValue(ReceiveValue<V>),
}

impl<K, V, M> CacheAction<K, V, M> {
    pub fn cache_id(&self) -> &CacheId {
        match self {
            Self::AwaitValue(a) => &a.cache_id,
            Self::ReceiveValue(a) => &a.cache_id,
        }
    }
    pub fn request_id(&self) -> &RequestId {
        match self {
            Self::AwaitValue(a) => &a.request_id,
            Self::ReceiveValue(a) => &a.request_id,
        }
    }
}

impl<K, V, M> From<AwaitValue<K, M>> for CacheAction<K, V, M> {
    fn from(value: AwaitValue<K, M>) -> Self {
        Self::AwaitValue(value)
    }
}
impl<K, V, M> From<ReceiveValue<V>> for CacheAction<K, V, M> {
    fn from(value: ReceiveValue<V>) -> Self {
        Self::ReceiveValue(value)
    }
}

pub fn await_value<K, M>(
    cache_id: CacheId,
    key: K,
    request_id: RequestId,
    meta: Option<M>,
) -> AwaitValue<K, M> {
    AwaitValue {
        cache_id,
        key,
        request_id,
        meta,
    }
}

pub fn receive_value<V>(cache_id: CacheId, request_id: RequestId, value: V) -> ReceiveValue<V> {
    ReceiveValue {
        cache_id,
        request_id,
        value,
    }
}

/// An application action that may carry a [`CacheAction`].
///
/// Applications that route several kinds of actions through one channel implement this for their
/// action type so every cache reducer can pick out its own events.
pub trait GenericAction<K, V, M> {
    fn as_cache_action(&self) -> Option<&CacheAction<K, V, M>>;
}

impl<K, V, M> GenericAction<K, V, M> for CacheAction<K, V, M> {
    fn as_cache_action(&self) -> Option<&CacheAction<K, V, M>> {
        Some(self)
    }
}

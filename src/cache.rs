use std::{rc::Rc, slice};

use derive_ex::Ex;
use parse_display::Display;
use serde::{Deserialize, Serialize};

use crate::{Equality, RequestId};

#[cfg(test)]
mod tests;

/// Immutable snapshot of a keyed store of asynchronously obtained values.
///
/// Entries are ordered by last write: replacing an entry moves it to the end, while resolving a
/// request leaves it in place. Every mutation produces a new snapshot; snapshots that are
/// still referenced elsewhere are never modified, so cloning a `Cache` is cheap and a reader
/// always sees a consistent state.
#[derive(Ex, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive_ex(Clone(bound()))]
#[serde(transparent)]
pub struct Cache<K, V, M = ()> {
    entries: Rc<Vec<CacheEntry<K, V, M>>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry<K, V, M = ()> {
    key: K,
    state: EntryState<V>,
    request_id: Option<RequestId>,
    meta: Option<M>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState<V> {
    Awaiting,
    Received(V),
}

/// Result of looking up a key in a [`Cache`].
#[derive(Debug, PartialEq, Eq)]
pub enum CacheLookup<'a, V> {
    Absent,
    Awaiting,
    Received(&'a V),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[display(style = "snake_case")]
pub enum LookupKind {
    Absent,
    Awaiting,
    Received,
}

impl<V> CacheLookup<'_, V> {
    pub fn kind(&self) -> LookupKind {
        match self {
            Self::Absent => LookupKind::Absent,
            Self::Awaiting => LookupKind::Awaiting,
            Self::Received(_) => LookupKind::Received,
        }
    }
}

impl<K, V, M> CacheEntry<K, V, M> {
    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn state(&self) -> &EntryState<V> {
        &self.state
    }
    pub fn value(&self) -> Option<&V> {
        match &self.state {
            EntryState::Awaiting => None,
            EntryState::Received(value) => Some(value),
        }
    }
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
    pub fn meta(&self) -> Option<&M> {
        self.meta.as_ref()
    }

    /// Returns `true` if a request for this entry has been started and not yet received.
    pub fn is_in_flight(&self) -> bool {
        self.request_id.is_some()
    }
}

impl<K, V, M> Cache<K, V, M> {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn iter(&self) -> slice::Iter<'_, CacheEntry<K, V, M>> {
        self.entries.iter()
    }
    pub fn entries(&self) -> &[CacheEntry<K, V, M>] {
        &self.entries
    }

    /// Returns `true` if both caches are the same snapshot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    pub fn get(&self, key: &K, eq: &(impl Equality<K> + ?Sized)) -> Option<&CacheEntry<K, V, M>> {
        self.position(key, eq).map(|index| &self.entries[index])
    }
    pub fn lookup(&self, key: &K, eq: &(impl Equality<K> + ?Sized)) -> CacheLookup<'_, V> {
        match self.get(key, eq).map(|e| &e.state) {
            None => CacheLookup::Absent,
            Some(EntryState::Awaiting) => CacheLookup::Awaiting,
            Some(EntryState::Received(value)) => CacheLookup::Received(value),
        }
    }
    pub fn find_request(&self, request_id: &RequestId) -> Option<&CacheEntry<K, V, M>> {
        self.request_position(request_id)
            .map(|index| &self.entries[index])
    }
    pub fn in_flight_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_in_flight()).count()
    }

    fn position(&self, key: &K, eq: &(impl Equality<K> + ?Sized)) -> Option<usize> {
        self.entries.iter().position(|e| eq.are_equal(&e.key, key))
    }
    fn request_position(&self, request_id: &RequestId) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.request_id.as_ref() == Some(request_id))
    }
}

impl<K: Clone, V: Clone, M: Clone> Cache<K, V, M> {
    /// Keeps only the entries for which `f` returns `true`.
    ///
    /// Returns the same snapshot if no entry is removed.
    pub fn retain(mut self, mut f: impl FnMut(&CacheEntry<K, V, M>) -> bool) -> Self {
        let keep: Vec<bool> = self.entries.iter().map(&mut f).collect();
        if keep.iter().all(|&k| k) {
            return self;
        }
        let mut keep = keep.into_iter();
        Rc::make_mut(&mut self.entries).retain(|_| keep.next().unwrap_or(true));
        self
    }

    /// Inserts or replaces a received entry for `key`, moving it to the end.
    ///
    /// Any in-flight request for the key is dropped, so its later receive is ignored.
    pub fn with_received(self, key: K, value: V, eq: &(impl Equality<K> + ?Sized)) -> Self {
        self.upsert(
            CacheEntry {
                key,
                state: EntryState::Received(value),
                request_id: None,
                meta: None,
            },
            eq,
        )
        .0
    }

    /// Marks `key` as awaiting `request_id`, returning the snapshot and the superseded request.
    pub(crate) fn with_awaiting(
        self,
        key: K,
        request_id: RequestId,
        meta: Option<M>,
        eq: &(impl Equality<K> + ?Sized),
    ) -> (Self, Option<RequestId>) {
        self.upsert(
            CacheEntry {
                key,
                state: EntryState::Awaiting,
                request_id: Some(request_id),
                meta,
            },
            eq,
        )
    }

    /// Resolves the entry waiting on `request_id`.
    ///
    /// Returns the unchanged snapshot as `Err` if no entry is waiting on it.
    pub(crate) fn with_resolved(
        mut self,
        request_id: &RequestId,
        value: V,
    ) -> std::result::Result<Self, Self> {
        let Some(index) = self.request_position(request_id) else {
            return Err(self);
        };
        let entry = &mut Rc::make_mut(&mut self.entries)[index];
        entry.state = EntryState::Received(value);
        entry.request_id = None;
        Ok(self)
    }

    fn upsert(
        mut self,
        entry: CacheEntry<K, V, M>,
        eq: &(impl Equality<K> + ?Sized),
    ) -> (Self, Option<RequestId>) {
        let position = self.position(&entry.key, eq);
        let entries = Rc::make_mut(&mut self.entries);
        let superseded = position.and_then(|index| entries.remove(index).request_id);
        entries.push(entry);
        (self, superseded)
    }
}

impl<K, V, M> Default for Cache<K, V, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V, M> IntoIterator for &'a Cache<K, V, M> {
    type Item = &'a CacheEntry<K, V, M>;
    type IntoIter = slice::Iter<'a, CacheEntry<K, V, M>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

use std::{cell::Cell, rc::Rc};

use parse_display::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Correlates an "await value" event with its later "receive value" event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("{0}")]
#[serde(transparent)]
pub struct RequestId(Rc<str>);

impl RequestId {
    pub fn new(id: impl Into<Rc<str>>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

thread_local! {
    static NEXT_REQUEST: Rc<Cell<u64>> = Rc::new(Cell::new(1));
}

/// Generates request ids of the form `{prefix}-{n}`.
///
/// All generators on a thread draw `n` from one counter starting at 1, so ids never repeat
/// across executors, even ones that share a prefix. Ids restart with the process; if in-flight
/// requests can be restored from serialized state, use
/// [`with_random_prefix`](Self::with_random_prefix).
#[derive(Debug, Clone)]
pub struct RequestIdGenerator {
    prefix: Rc<str>,
    next: Rc<Cell<u64>>,
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self::with_prefix("req")
    }
    pub fn with_prefix(prefix: impl Into<Rc<str>>) -> Self {
        Self {
            prefix: prefix.into(),
            next: NEXT_REQUEST.with(|next| next.clone()),
        }
    }
    /// Uses a random v4 UUID as the prefix.
    pub fn with_random_prefix() -> Self {
        Self::with_prefix(Uuid::new_v4().to_string())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn next_id(&self) -> RequestId {
        let n = self.next.get();
        self.next.set(n + 1);
        RequestId::new(format!("{}-{n}", self.prefix))
    }
}
impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

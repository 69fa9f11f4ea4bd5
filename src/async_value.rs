use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Derived state of a value that may have to be obtained asynchronously.
///
/// A `Pending` value lists the commands that would resolve it, in the order they should be tried.
/// An empty list means nothing can be done right now, e.g. because a request is already in flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsyncValue<C, V> {
    Pending(Vec<C>),
    Received(V),
}

impl<C, V> AsyncValue<C, V> {
    pub fn pending(command: C) -> Self {
        Self::Pending(vec![command])
    }
    pub fn none() -> Self {
        Self::Pending(Vec::new())
    }

    pub fn is_received(&self) -> bool {
        matches!(self, Self::Received(_))
    }
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Pending(_) => None,
            Self::Received(value) => Some(value),
        }
    }
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Pending(_) => None,
            Self::Received(value) => Some(value),
        }
    }

    /// Returns the pending commands. Always empty for a received value.
    pub fn commands(&self) -> &[C] {
        match self {
            Self::Pending(commands) => commands,
            Self::Received(_) => &[],
        }
    }

    /// Removes and returns the first pending command.
    pub fn take_next_command(&mut self) -> Option<C> {
        match self {
            Self::Pending(commands) if !commands.is_empty() => Some(commands.remove(0)),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> AsyncValue<C, U> {
        match self {
            Self::Pending(commands) => AsyncValue::Pending(commands),
            Self::Received(value) => AsyncValue::Received(f(value)),
        }
    }
    pub fn map_commands<D>(self, f: impl FnMut(C) -> D) -> AsyncValue<D, V> {
        match self {
            Self::Pending(commands) => AsyncValue::Pending(commands.into_iter().map(f).collect()),
            Self::Received(value) => AsyncValue::Received(value),
        }
    }
}

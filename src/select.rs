use std::fmt;

use derive_ex::Ex;

use crate::{AsyncValue, TrackedUserInput};

#[cfg(test)]
mod tests;

/// A derived asynchronous value together with the user input it was derived from.
#[derive(Ex)]
#[derive_ex(Clone)]
pub struct AsyncSelectorResult<S, P, C, V> {
    pub async_value: AsyncValue<C, V>,
    pub tracked_user_input: TrackedUserInput<S, P>,
}

impl<S, P, C, V> AsyncSelectorResult<S, P, C, V> {
    pub fn new(async_value: AsyncValue<C, V>, tracked_user_input: TrackedUserInput<S, P>) -> Self {
        Self {
            async_value,
            tracked_user_input,
        }
    }
    /// A result that does not depend on any user input.
    pub fn untracked(async_value: AsyncValue<C, V>) -> Self {
        Self::new(async_value, TrackedUserInput::none())
    }

    pub fn value(&self) -> Option<&V> {
        self.async_value.value()
    }
}

impl<S, P, C: fmt::Debug, V: fmt::Debug> fmt::Debug for AsyncSelectorResult<S, P, C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSelectorResult")
            .field("async_value", &self.async_value)
            .field("tracked_user_input", &self.tracked_user_input)
            .finish()
    }
}

/// A fixed-shape set of [`AsyncSelectorResult`]s.
///
/// Implementations visit their parts in a fixed order, which decides which pending command is
/// executed first. Use `#[derive(AsyncProps)]` for structs.
pub trait AsyncProps<S, P, C>: Sized {
    /// Removes and returns the first pending command.
    fn take_next_command(&mut self) -> Option<C>;

    /// Chooses between `self` and the previously presented `prev`.
    fn merge_with_previous(self, prev: Self, app_state: &S, own_props: &P) -> Self;
}

impl<S, P, C, V> AsyncProps<S, P, C> for AsyncSelectorResult<S, P, C, V> {
    fn take_next_command(&mut self) -> Option<C> {
        self.async_value.take_next_command()
    }

    fn merge_with_previous(self, prev: Self, app_state: &S, own_props: &P) -> Self {
        if self.async_value.is_received() {
            self
        } else if prev
            .tracked_user_input
            .some_has_changed(app_state, own_props)
        {
            self
        } else {
            prev
        }
    }
}

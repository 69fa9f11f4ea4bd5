use std::{fmt, rc::Rc};

use derive_ex::Ex;

use crate::{Equality, StructuralEq};


trait TrackedInput<S, P> {
    fn has_changed(&self, app_state: &S, own_props: &P) -> bool;
}

struct TrackedValue<F, T, E> {
    select: F,
    value: T,
    eq: E,
}

impl<S, P, F, T, E> TrackedInput<S, P> for TrackedValue<F, T, E>
where
    F: Fn(&S, &P) -> T,
    E: Equality<T>,
{
    fn has_changed(&self, app_state: &S, own_props: &P) -> bool {
        !self
            .eq
            .are_equal(&self.value, &(self.select)(app_state, own_props))
    }
}

/// The projections of application state and own props a derived value depends on, recorded at
/// derivation time.
///
/// Used to tell a genuine change of user input apart from a background refresh.
#[derive(Ex)]
#[derive_ex(Clone(bound()))]
pub struct TrackedUserInput<S, P> {
    inputs: Rc<Vec<Box<dyn TrackedInput<S, P>>>>,
}

impl<S, P> TrackedUserInput<S, P> {
    /// Tracks nothing, so it never reports a change.
    pub fn none() -> Self {
        Self {
            inputs: Rc::new(Vec::new()),
        }
    }
    pub fn builder<'a>(app_state: &'a S, own_props: &'a P) -> TrackedUserInputBuilder<'a, S, P> {
        TrackedUserInputBuilder {
            app_state,
            own_props,
            inputs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Returns `true` if any tracked projection differs from its recorded value.
    pub fn some_has_changed(&self, app_state: &S, own_props: &P) -> bool {
        self.inputs
            .iter()
            .any(|input| input.has_changed(app_state, own_props))
    }
}
impl<S, P> Default for TrackedUserInput<S, P> {
    fn default() -> Self {
        Self::none()
    }
}
impl<S, P> fmt::Debug for TrackedUserInput<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedUserInput")
            .field("len", &self.len())
            .finish()
    }
}

pub struct TrackedUserInputBuilder<'a, S, P> {
    app_state: &'a S,
    own_props: &'a P,
    inputs: Vec<Box<dyn TrackedInput<S, P>>>,
}

impl<S, P> TrackedUserInputBuilder<'_, S, P> {
    pub fn track<T>(self, select: impl Fn(&S, &P) -> T + 'static) -> Self
    where
        T: PartialEq + 'static,
    {
        self.track_with(select, StructuralEq)
    }

    pub fn track_with<T: 'static>(
        mut self,
        select: impl Fn(&S, &P) -> T + 'static,
        eq: impl Equality<T> + 'static,
    ) -> Self {
        let value = select(self.app_state, self.own_props);
        self.inputs.push(Box::new(TrackedValue { select, value, eq }));
        self
    }

    pub fn build(self) -> TrackedUserInput<S, P> {
        TrackedUserInput {
            inputs: Rc::new(self.inputs),
        }
    }
}

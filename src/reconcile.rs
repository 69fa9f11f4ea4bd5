use crate::AsyncProps;


/// Runs side-effecting commands.
///
/// `execute` should only start the work (for example dispatch an await action and spawn a
/// fetch) and return immediately.
pub trait CommandExecutor<C> {
    fn execute(&mut self, command: C);
}

impl<C, F: FnMut(C)> CommandExecutor<C> for F {
    fn execute(&mut self, command: C) {
        self(command)
    }
}

/// Derives the next async props from application state.
///
/// First, pending commands are drained: the props are derived from the current application state
/// and the first pending command, in the order [`AsyncProps`] visits its parts, is executed. This
/// repeats, re-reading the application state each time, until the derived props carry no pending
/// command. Exactly one command is executed per derivation.
///
/// Then each part is merged with its counterpart in `prev_state`:
///
/// - a received value is always presented,
/// - an unresolved value is presented if the user input tracked by the previous part has changed,
/// - otherwise the previous part is kept while the value is being refreshed in the background.
///
/// Without `prev_state` the derived props are returned as is.
///
/// The drain loop has no iteration limit. Executing a command must eventually stop it from being
/// derived again, typically because the executor records an in-flight request in the application
/// state. An executor that never makes progress makes this function loop forever.
pub fn reconcile<S, P, C, R>(
    executor: &mut impl CommandExecutor<C>,
    mut get_app_state: impl FnMut() -> S,
    own_props: &P,
    map_state_to_async_props: impl Fn(&S, &P) -> R,
    prev_state: Option<R>,
) -> R
where
    R: AsyncProps<S, P, C>,
{
    let mut executed = 0usize;
    loop {
        let app_state = get_app_state();
        let mut props = map_state_to_async_props(&app_state, own_props);
        if let Some(command) = props.take_next_command() {
            executed += 1;
            tracing::trace!(executed, "execute pending command");
            executor.execute(command);
            continue;
        }
        tracing::debug!(executed, "pending commands drained");
        return match prev_state {
            Some(prev_state) => props.merge_with_previous(prev_state, &app_state, own_props),
            None => props,
        };
    }
}

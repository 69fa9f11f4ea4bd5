use std::{cell::RefCell, rc::Rc};

/// Minimal single-threaded state container.
pub struct Store<S, A> {
    state: RefCell<S>,
    reducer: Box<dyn Fn(&S, &A) -> S>,
}

impl<S: Clone + 'static, A: 'static> Store<S, A> {
    pub fn new(state: S, reducer: impl Fn(&S, &A) -> S + 'static) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(state),
            reducer: Box::new(reducer),
        })
    }

    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    pub fn dispatch(&self, action: A) {
        let next = (self.reducer)(&self.state.borrow(), &action);
        *self.state.borrow_mut() = next;
    }
}

//! Bound state for inspected objects.
//!
//! Associates mutable state with a binding object by pointer identity,
//! holding the binding weakly so dropped bindings release their state on the
//! next access.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Weakly-keyed store of per-binding state.
pub struct StateStore<T, S> {
    entries: RefCell<Vec<(Weak<T>, Rc<RefCell<S>>)>>,
}

impl<T, S> StateStore<T, S> {
    pub fn new() -> Self {
        StateStore {
            entries: RefCell::new(Vec::new()),
        }
    }

    /// State for `binding`, initializing it on first sight.
    ///
    /// The same binding (pointer identity) yields the same state handle until
    /// the binding is dropped.
    pub fn bind(&self, binding: &Rc<T>, init: impl FnOnce(&T) -> S) -> Rc<RefCell<S>> {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|(weak, _)| weak.strong_count() > 0);

        if let Some((_, state)) = entries
            .iter()
            .find(|(weak, _)| weak.as_ptr() == Rc::as_ptr(binding))
        {
            return state.clone();
        }

        let state = Rc::new(RefCell::new(init(binding)));
        entries.push((Rc::downgrade(binding), state.clone()));
        state
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(weak, _)| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, S> Default for StateStore<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

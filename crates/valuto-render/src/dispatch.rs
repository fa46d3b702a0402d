//! Action dispatch: wiring content-authored actions to a host callback.

use std::fmt;
use std::rc::Rc;
use valuto_core::Action;

/// Host capability invoked with an action payload when an element is activated.
///
/// What an action means is entirely up to the host. Any `Fn(&Action)` closure is a
/// dispatcher.
pub trait ActionDispatcher {
    fn dispatch(&self, action: &Action);
}

impl<F> ActionDispatcher for F
where
    F: Fn(&Action),
{
    fn dispatch(&self, action: &Action) {
        self(action)
    }
}

/// Activation handler synthesized for an element that carries an action.
///
/// Holds the payload captured at render time; each `fire` invokes the dispatcher once,
/// synchronously, with that payload.
#[derive(Clone)]
pub struct ActivationHandler {
    action: Action,
    dispatcher: Rc<dyn ActionDispatcher>,
}

impl ActivationHandler {
    pub fn new(action: Action, dispatcher: Rc<dyn ActionDispatcher>) -> Self {
        Self { action, dispatcher }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn fire(&self) {
        self.dispatcher.dispatch(&self.action);
    }
}

impl fmt::Debug for ActivationHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationHandler")
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

/// Handlers compare by payload; two renders of the same tree are structurally equal
/// even though each closes over its own dispatcher.
impl PartialEq for ActivationHandler {
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action
    }
}

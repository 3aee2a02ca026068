//! Synchronous, single-threaded publish/subscribe channel.
//!
//! Each state object (mouse, keyboard) owns its own [`Emitter`]. Handlers are
//! keyed by the event's [`Event::kind`] and run in registration order, to
//! completion, inside `emit`. Handlers must not reach back into the object that
//! owns the emitter; they typically capture `Rc<RefCell<..>>` host state.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::fmt;

/// A payload that can be routed by kind.
pub trait Event {
    type Kind: Copy + Eq + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`Emitter::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

struct Listener<E: Event> {
    id: Subscription,
    kind: E::Kind,
    handler: Handler<E>,
}

/// Ordered list of subscribers for one event type.
pub struct Emitter<E: Event> {
    listeners: Vec<Listener<E>>,
    next_id: u64,
}

impl<E: Event> Emitter<E> {
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Vec::new(), next_id: 0 }
    }

    /// Register `handler` for events of `kind`.
    pub fn on<F>(&mut self, kind: E::Kind, handler: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, kind, handler: Box::new(handler) });
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn off(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != subscription);
        self.listeners.len() != before
    }

    /// Deliver `event` to every handler registered for its kind.
    pub fn emit(&mut self, event: &E) {
        let kind = event.kind();
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.handler)(event);
        }
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }
}

impl<E: Event> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

//! Broadcast emitters
//!
//! An [`EventEmitter`] is a single-threaded broadcast channel: every
//! subscriber sees every emitted value, in subscription order. Emitters are
//! open when created and are closed exactly once with
//! [`complete`](EventEmitter::complete); after that, emitting and
//! subscribing are no-ops.
//!
//! `EventEmitter<()>` is the payload-less "state changed" signal a control
//! uses to tell surrounding chrome to re-render.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle returned by [`EventEmitter::subscribe`]
    pub struct SubscriptionId;
}

type Listener<T> = Rc<dyn Fn(&T)>;

/// Single-threaded broadcast channel with an explicit completion step
pub struct EventEmitter<T> {
    listeners: RefCell<SlotMap<SubscriptionId, Listener<T>>>,
    closed: Cell<bool>,
    /// Number of values delivered since creation
    emitted: Cell<u64>,
}

impl<T: 'static> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(SlotMap::with_key()),
            closed: Cell::new(false),
            emitted: Cell::new(0),
        }
    }

    /// Subscribe a listener
    ///
    /// Subscribing to a completed emitter returns the null key and the
    /// listener is dropped immediately.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        if self.closed.get() {
            return SubscriptionId::default();
        }
        self.listeners.borrow_mut().insert(Rc::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(id).is_some()
    }

    /// Deliver a value to every listener
    ///
    /// Listeners may subscribe, unsubscribe or complete the emitter while
    /// being notified; the set of listeners for this emission is fixed
    /// before the first one runs.
    pub fn emit(&self, value: &T) {
        if self.closed.get() {
            return;
        }
        let listeners: SmallVec<[Listener<T>; 4]> =
            self.listeners.borrow().values().cloned().collect();
        self.emitted.set(self.emitted.get() + 1);
        for listener in listeners {
            listener(value);
        }
    }

    /// Close the emitter and drop every listener. Idempotent.
    pub fn complete(&self) {
        if self.closed.replace(true) {
            return;
        }
        // Take the map out first so listener drops cannot observe a live borrow
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        drop(listeners);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of emissions delivered so far
    pub fn emitted_count(&self) -> u64 {
        self.emitted.get()
    }
}

impl EventEmitter<()> {
    /// Emit a payload-less notification
    pub fn notify(&self) {
        self.emit(&());
    }
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscribers", &self.listeners.borrow().len())
            .field("closed", &self.closed.get())
            .field("emitted", &self.emitted.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let emitter = EventEmitter::<i32>::new();
        let sum = Rc::new(Cell::new(0));

        let a = sum.clone();
        emitter.subscribe(move |v| a.set(a.get() + *v));
        let b = sum.clone();
        emitter.subscribe(move |v| b.set(b.get() + *v * 10));

        emitter.emit(&2);
        assert_eq!(sum.get(), 22);
        assert_eq!(emitter.emitted_count(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let emitter = EventEmitter::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = emitter.subscribe(move |_| h.set(h.get() + 1));

        emitter.notify();
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.notify();

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_complete_is_idempotent_and_final() {
        let emitter = EventEmitter::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        emitter.subscribe(move |_| h.set(h.get() + 1));

        emitter.complete();
        emitter.complete();
        assert!(emitter.is_closed());
        assert_eq!(emitter.subscriber_count(), 0);

        emitter.notify();
        assert_eq!(hits.get(), 0);

        let late = emitter.subscribe(|_| {});
        assert_eq!(late, SubscriptionId::default());
        assert_eq!(emitter.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_may_complete_during_emit() {
        let emitter = Rc::new(EventEmitter::<()>::new());
        let hits = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&emitter);
        emitter.subscribe(move |_| {
            if let Some(e) = weak.upgrade() {
                e.complete();
            }
        });
        let h = hits.clone();
        emitter.subscribe(move |_| h.set(h.get() + 1));

        emitter.notify();
        // The second listener was part of this emission
        assert_eq!(hits.get(), 1);
        assert!(emitter.is_closed());
    }
}

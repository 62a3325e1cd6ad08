//! A minimal, intrusive-membership observer list.
//!
//! Every mutating entity owns one `Signal<E>` and fires it synchronously after a
//! successful mutation. A [`SignalHandle`] is the detaching observer object: it
//! removes its own callback when dropped, so nothing can observe a signal past
//! its own lifetime. Signals are not re-entrant — a handler that tries to notify
//! the same signal while it is already notifying hits a debug assertion.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct Observer<E> {
    id: u64,
    callback: Rc<dyn Fn(&E)>,
}

struct Inner<E> {
    observers: RefCell<Vec<Observer<E>>>,
    next_id: Cell<u64>,
    emitting: Cell<bool>,
}

/// An emitter of synchronous `E` events.
pub struct Signal<E> {
    inner: Rc<Inner<E>>,
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Signal::new()
    }
}

impl<E> Signal<E> {
    pub fn new() -> Self {
        Signal {
            inner: Rc::new(Inner {
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                emitting: Cell::new(false),
            }),
        }
    }

    /// Registers `callback`, returning a handle that detaches it on drop.
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> SignalHandle<E> {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.observers.borrow_mut().push(Observer {
            id,
            callback: Rc::new(callback),
        });
        SignalHandle {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Fires `event` to every live observer, in subscription order.
    ///
    /// Callbacks are cloned (cheap `Rc` bumps) out of the observer list before
    /// being invoked, so a handler that drops its own `SignalHandle` mid-emit
    /// cannot deadlock on the list's `RefCell` borrow.
    pub fn notify(&self, event: &E) {
        debug_assert!(!self.inner.emitting.get(), "signal emission is not re-entrant");
        self.inner.emitting.set(true);
        let callbacks: Vec<Rc<dyn Fn(&E)>> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|o| o.callback.clone())
            .collect();
        for callback in &callbacks {
            callback(event);
        }
        self.inner.emitting.set(false);
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

/// An observer's membership in a [`Signal`]; detaches automatically on drop.
pub struct SignalHandle<E> {
    inner: Weak<Inner<E>>,
    id: u64,
}

impl<E> Drop for SignalHandle<E> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.observers.borrow_mut().retain(|o| o.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;

    #[test]
    fn fires_subscribed_callbacks() {
        let signal: Signal<i32> = Signal::new();
        let seen = Rc::new(StdRefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let _handle = signal.subscribe(move |e| seen2.borrow_mut().push(*e));
        signal.notify(&42);
        assert_eq!(*seen.borrow(), vec![42]);
    }

    #[test]
    fn detaches_on_drop() {
        let signal: Signal<i32> = Signal::new();
        let handle = signal.subscribe(|_| {});
        assert_eq!(signal.observer_count(), 1);
        drop(handle);
        assert_eq!(signal.observer_count(), 0);
    }
}

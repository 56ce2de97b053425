//! Subscription capability
//!
//! The store only needs two things from its observable: publish a value to the
//! current subscribers in subscription order, and hand out a disposable handle per
//! subscriber. [`Subject`] is the implementation used unless another is supplied.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Broadcasts values to subscribers in subscription order
pub trait Observable {
    type Value;

    /// Deliver `value` to every current subscriber
    fn publish(&self, value: &Self::Value);

    /// Register a subscriber; it stays registered until the handle is disposed
    fn subscribe(&self, callback: Box<dyn Fn(&Self::Value)>) -> Subscription;

    fn subscriber_count(&self) -> usize;
}

/// Disposable handle for a registered subscriber
///
/// Dropping the handle disposes it. Use [`detach`](Subscription::detach) to keep
/// the subscriber for the lifetime of the observable.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a handle that runs `dispose` once, on disposal or drop
    pub fn new<F>(dispose: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// A handle with nothing to dispose
    pub fn empty() -> Self {
        Self { dispose: None }
    }

    /// Remove the subscriber now
    pub fn dispose(mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }

    /// Give up the handle without removing the subscriber
    pub fn detach(mut self) {
        self.dispose = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    entries: RefCell<Vec<(u64, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

/// In-process observable holding its subscribers in a list
///
/// `publish` iterates over a snapshot of the list, so subscribers added or
/// disposed from inside a callback take effect from the next publish on.
pub struct Subject<T> {
    subscribers: Rc<Subscribers<T>>,
}

impl<T> Subject<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(Subscribers {
                entries: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Observable for Subject<T> {
    type Value = T;

    fn publish(&self, value: &T) {
        let snapshot: Vec<Subscriber<T>> = self
            .subscribers
            .entries
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();

        for subscriber in snapshot {
            subscriber(value);
        }
    }

    fn subscribe(&self, callback: Box<dyn Fn(&T)>) -> Subscription {
        let id = self.subscribers.next_id.get();
        self.subscribers.next_id.set(id + 1);
        self.subscribers
            .entries
            .borrow_mut()
            .push((id, Rc::from(callback)));

        let subscribers: Weak<Subscribers<T>> = Rc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers
                    .entries
                    .borrow_mut()
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.entries.borrow().len()
    }
}

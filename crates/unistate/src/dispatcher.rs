//! Dispatch capabilities
//!
//! Two ways of getting work into a store:
//!
//! - [`Dispatch`] is the raw, synchronous entry point handed to middleware. An
//!   action dispatched through it re-enters the full pipeline and completes
//!   before the calling middleware continues.
//! - [`Dispatcher`] is the handle given to asynchronous action creators. It is
//!   `Send`, so it can travel to worker threads; deliveries are queued on a channel
//!   and dispatched on the thread that owns the store.

use std::sync::mpsc::Sender;

use thiserror::Error;

use crate::action::{ActionCreator, DispatchCallback, Dispatched};

/// Raw dispatch: runs an action through the whole pipeline
pub trait Dispatch<A> {
    fn dispatch(&self, action: A) -> Dispatched<A>;
}

/// Errors returned when delivering an action creator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The store was dropped before the delivery could be queued
    #[error("store is no longer accepting deliveries")]
    StoreDropped,
}

/// A queued action creator together with the callback of the async dispatch
/// that produced it
pub(crate) struct Delivery<S, A> {
    pub(crate) creator: ActionCreator<S, A>,
    pub(crate) callback: Option<DispatchCallback<S>>,
}

/// Delivers action creators back to the store from any thread
///
/// Each delivered creator is evaluated against the store's state at the time the
/// store processes it, which makes it the right place for cancellation guards.
pub struct Dispatcher<S, A> {
    delivery_tx: Sender<Delivery<S, A>>,
    callback: Option<DispatchCallback<S>>,
}

impl<S, A> Dispatcher<S, A> {
    pub(crate) fn new(delivery_tx: Sender<Delivery<S, A>>, callback: Option<DispatchCallback<S>>) -> Self {
        Self {
            delivery_tx,
            callback,
        }
    }

    /// Queue an action creator for dispatch on the store's thread
    pub fn deliver<F>(&self, creator: F) -> Result<(), DeliveryError>
    where
        F: FnOnce(&S, &crate::Store<S, A>) -> Option<A> + Send + 'static,
    {
        let delivery = Delivery {
            creator: Box::new(creator),
            callback: self.callback.clone(),
        };
        self.delivery_tx.send(delivery).map_err(|_| {
            log::warn!("Dispatcher: store dropped, delivery discarded");
            DeliveryError::StoreDropped
        })
    }

    /// Deliver a creator that always yields `action`
    pub fn deliver_action(&self, action: A) -> Result<(), DeliveryError>
    where
        A: Send + 'static,
    {
        self.deliver(move |_, _| Some(action))
    }
}

// Manual impl: derive would require `S: Clone` and `A: Clone`
impl<S, A> Clone for Dispatcher<S, A> {
    fn clone(&self) -> Self {
        Self {
            delivery_tx: self.delivery_tx.clone(),
            callback: self.callback.clone(),
        }
    }
}

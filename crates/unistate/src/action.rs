//! Action contracts
//!
//! Actions themselves are application-defined; any value type works. This module
//! holds the types that travel alongside them through the pipeline.

use std::sync::Arc;

use crate::store::Store;

/// Outcome of a single dispatch
///
/// `Reduced` carries the action as it reached the reducer, which may differ from
/// the dispatched one when middleware rewrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched<A> {
    Reduced(A),
    Vetoed,
}

impl<A> Dispatched<A> {
    pub fn is_reduced(&self) -> bool {
        matches!(self, Dispatched::Reduced(_))
    }

    pub fn is_vetoed(&self) -> bool {
        matches!(self, Dispatched::Vetoed)
    }

    /// The action the reducer saw, if any
    pub fn action(&self) -> Option<&A> {
        match self {
            Dispatched::Reduced(action) => Some(action),
            Dispatched::Vetoed => None,
        }
    }

    pub fn into_action(self) -> Option<A> {
        match self {
            Dispatched::Reduced(action) => Some(action),
            Dispatched::Vetoed => None,
        }
    }
}

/// Decides from the current state whether to produce an action
///
/// This is the boxed form used for deliveries from asynchronous action creators,
/// which may be produced on any thread. Synchronous dispatch through
/// [`Store::dispatch_creator`] accepts any matching closure.
pub type ActionCreator<S, A> = Box<dyn FnOnce(&S, &Store<S, A>) -> Option<A> + Send>;

/// Invoked with the new state after each action dispatched from an async delivery
pub type DispatchCallback<S> = Arc<dyn Fn(&S) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_exposes_action() {
        let outcome = Dispatched::Reduced(7);
        assert!(outcome.is_reduced());
        assert_eq!(outcome.action(), Some(&7));
        assert_eq!(outcome.into_action(), Some(7));
    }

    #[test]
    fn test_vetoed_has_no_action() {
        let outcome: Dispatched<u8> = Dispatched::Vetoed;
        assert!(outcome.is_vetoed());
        assert!(!outcome.is_reduced());
        assert_eq!(outcome.into_action(), None);
    }
}

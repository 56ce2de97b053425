//! Unidirectional state container
//!
//! This crate provides:
//! - A [`Store`] owning a single application state, replaced only by a reducer
//! - A composable [`Middleware`] algebra sitting between dispatch and reduction
//! - An [`Observable`] subscription capability with a default [`Subject`]
//! - Action creators, including asynchronous ones delivered through a [`Dispatcher`]
//!
//! ## Data flow
//!
//! ```text
//! dispatch(action) → Middleware chain → Reducer → State → Subscribers
//! ```
//!
//! ## Example
//!
//! ```rust
//! use unistate::{Middleware, Store};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Action {
//!     Increment,
//!     Decrement,
//! }
//!
//! fn reduce(state: &i64, action: &Action) -> i64 {
//!     match action {
//!         Action::Increment => state + 1,
//!         Action::Decrement => state - 1,
//!     }
//! }
//!
//! let no_decrement = Middleware::<i64, Action>::new().filter(|_, action| *action != Action::Decrement);
//! let store = Store::with_middleware(reduce, 0, [no_decrement]);
//!
//! store.dispatch(Action::Increment);
//! store.dispatch(Action::Decrement);
//! assert_eq!(*store.state(), 1);
//! ```

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod middleware;
pub mod observable;
pub mod reducer;
pub mod store;

pub use action::{ActionCreator, DispatchCallback, Dispatched};
pub use config::StoreConfig;
pub use dispatcher::{DeliveryError, Dispatch, Dispatcher};
pub use middleware::{GetState, Middleware, StepKind};
pub use observable::{Observable, Subject, Subscription};
pub use reducer::Reducer;
pub use store::{Store, StoreBuilder};

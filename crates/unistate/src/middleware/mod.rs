//! Middleware algebra
//!
//! Middleware sits between action dispatch and reducer execution. A [`Middleware`]
//! value is an ordered list of steps; each step receives the surviving action from
//! the previous one and may rewrite it, veto it, or perform side effects.
//!
//! ```text
//! action → step 1 → step 2 → ... → step N → reducer
//!              ↘ None: the rest of the chain and the reducer never run
//! ```
//!
//! Middleware values are immutable. Every combinator returns a new value and
//! leaves its operands untouched, so a chain can be shared and extended freely.
//!
//! Steps receive a [`GetState`] accessor rather than a state snapshot: every call
//! returns the store's state at that moment, including changes made by nested
//! dispatches issued earlier in the same chain.

use std::fmt;
use std::rc::Rc;

use crate::dispatcher::Dispatch;

mod logging;

pub use logging::logging;

/// Accessor returning the store's current state when called
pub type GetState<'a, S> = &'a dyn Fn() -> Rc<S>;

type TransformFn<S, A> = dyn Fn(&dyn Fn() -> Rc<S>, &dyn Dispatch<A>, A) -> Option<A>;
type SideEffectFn<S, A> = dyn Fn(&dyn Fn() -> Rc<S>, &dyn Dispatch<A>, &A);
type MapFn<S, A> = dyn Fn(&dyn Fn() -> Rc<S>, A) -> A;
type FlatMapFn<S, A> = dyn Fn(&dyn Fn() -> Rc<S>, A) -> Option<A>;
type FilterFn<S, A> = dyn Fn(&dyn Fn() -> Rc<S>, &A) -> bool;

/// Kind of a single step in a middleware chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Transform,
    SideEffect,
    Map,
    FlatMap,
    Filter,
}

enum Step<S, A> {
    Transform(Rc<TransformFn<S, A>>),
    SideEffect(Rc<SideEffectFn<S, A>>),
    Map(Rc<MapFn<S, A>>),
    FlatMap(Rc<FlatMapFn<S, A>>),
    Filter(Rc<FilterFn<S, A>>),
}

impl<S, A> Step<S, A> {
    fn kind(&self) -> StepKind {
        match self {
            Step::Transform(_) => StepKind::Transform,
            Step::SideEffect(_) => StepKind::SideEffect,
            Step::Map(_) => StepKind::Map,
            Step::FlatMap(_) => StepKind::FlatMap,
            Step::Filter(_) => StepKind::Filter,
        }
    }

    fn apply(&self, get_state: GetState<'_, S>, dispatch: &dyn Dispatch<A>, action: A) -> Option<A> {
        match self {
            Step::Transform(transform) => transform(get_state, dispatch, action),
            Step::SideEffect(effect) => {
                effect(get_state, dispatch, &action);
                Some(action)
            }
            Step::Map(transform) => Some(transform(get_state, action)),
            Step::FlatMap(transform) => transform(get_state, action),
            Step::Filter(predicate) => predicate(get_state, &action).then_some(action),
        }
    }
}

// Manual impl: derive would require `S: Clone` and `A: Clone`
impl<S, A> Clone for Step<S, A> {
    fn clone(&self) -> Self {
        match self {
            Step::Transform(f) => Step::Transform(Rc::clone(f)),
            Step::SideEffect(f) => Step::SideEffect(Rc::clone(f)),
            Step::Map(f) => Step::Map(Rc::clone(f)),
            Step::FlatMap(f) => Step::FlatMap(Rc::clone(f)),
            Step::Filter(f) => Step::Filter(Rc::clone(f)),
        }
    }
}

/// A composable transform over actions
///
/// `Middleware::new()` is the identity: it forwards every action unchanged and is
/// the neutral element of [`concat`](Middleware::concat).
///
/// # Example
///
/// ```rust
/// use unistate::Middleware;
///
/// let doubled_positive = Middleware::<(), i32>::new()
///     .filter(|_, n| *n > 0)
///     .map(|_, n| n * 2);
///
/// let chain = Middleware::new().side_effect(|_, _, n: &i32| println!("saw {n}"));
/// let chain = chain.concat(&doubled_positive);
/// assert_eq!(chain.len(), 3);
/// ```
pub struct Middleware<S, A> {
    steps: Vec<Step<S, A>>,
}

impl<S, A> Middleware<S, A> {
    /// Blank-slate middleware, equal to [`identity`](Middleware::identity)
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Forwards every action unchanged
    pub fn identity() -> Self {
        Self::new()
    }

    /// Wrap a raw transform with access to state and the store's dispatch
    ///
    /// Returning `None` vetoes the action.
    pub fn from_fn<F>(transform: F) -> Self
    where
        F: Fn(GetState<'_, S>, &dyn Dispatch<A>, A) -> Option<A> + 'static,
    {
        Self {
            steps: vec![Step::Transform(Rc::new(transform))],
        }
    }

    /// Run `self`, then `other` on the surviving action
    pub fn concat(&self, other: &Middleware<S, A>) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(other.steps.iter().cloned());
        Self { steps }
    }

    /// Run `effect` on actions that survive `self`, forwarding them unchanged
    ///
    /// The effect may dispatch further actions; downstream steps still observe the
    /// original action.
    pub fn side_effect<F>(&self, effect: F) -> Self
    where
        F: Fn(GetState<'_, S>, &dyn Dispatch<A>, &A) + 'static,
    {
        self.with_step(Step::SideEffect(Rc::new(effect)))
    }

    /// Rewrite actions that survive `self`; never vetoes
    pub fn map<F>(&self, transform: F) -> Self
    where
        F: Fn(GetState<'_, S>, A) -> A + 'static,
    {
        self.with_step(Step::Map(Rc::new(transform)))
    }

    /// Rewrite or veto actions that survive `self`
    pub fn flat_map<F>(&self, transform: F) -> Self
    where
        F: Fn(GetState<'_, S>, A) -> Option<A> + 'static,
    {
        self.with_step(Step::FlatMap(Rc::new(transform)))
    }

    /// Drop actions that survive `self` but fail `predicate`
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(GetState<'_, S>, &A) -> bool + 'static,
    {
        self.with_step(Step::Filter(Rc::new(predicate)))
    }

    /// Compose a list of middleware in order, seeded with the identity
    pub fn concat_all<I>(middleware: I) -> Self
    where
        I: IntoIterator<Item = Middleware<S, A>>,
    {
        middleware
            .into_iter()
            .fold(Self::identity(), |chain, next| chain.concat(&next))
    }

    /// Run an action through every step, stopping at the first veto
    pub fn run(&self, get_state: GetState<'_, S>, dispatch: &dyn Dispatch<A>, action: A) -> Option<A> {
        self.steps
            .iter()
            .try_fold(action, |action, step| step.apply(get_state, dispatch, action))
    }

    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Kinds of the steps in execution order
    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(Step::kind).collect()
    }

    fn with_step(&self, step: Step<S, A>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl<S, A> Clone for Middleware<S, A> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<S, A> Default for Middleware<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> FromIterator<Middleware<S, A>> for Middleware<S, A> {
    fn from_iter<I: IntoIterator<Item = Middleware<S, A>>>(iter: I) -> Self {
        Self::concat_all(iter)
    }
}

impl<S, A> fmt::Debug for Middleware<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("steps", &self.kinds())
            .finish()
    }
}

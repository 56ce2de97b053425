use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::action::{DispatchCallback, Dispatched};
use crate::config::StoreConfig;
use crate::dispatcher::{Delivery, Dispatch, Dispatcher};
use crate::middleware::Middleware;
use crate::observable::{Observable, Subject, Subscription};
use crate::reducer::Reducer;

/// Store - holds application state and runs the dispatch pipeline
///
/// ```text
/// dispatch(action) → Middleware chain → Reducer → State → Subscribers
/// ```
///
/// # Threading
///
/// A store is single-threaded: every dispatch entry point, including
/// [`process_deliveries`](Store::process_deliveries), must run on the thread that
/// owns it. Work on other threads reaches the store through a [`Dispatcher`],
/// whose deliveries are queued and dispatched when the owning thread processes
/// them.
///
/// # Re-entrancy
///
/// Middleware and subscribers may dispatch while a dispatch is in progress. The
/// nested dispatch runs to completion, including notification, before the outer
/// one continues. Nesting deeper than [`StoreConfig::max_dispatch_depth`] panics.
pub struct Store<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Reducer<S, A>,
    middleware: Middleware<S, A>,
    observable: Box<dyn Observable<Value = Rc<S>>>,
    delivery_tx: Sender<Delivery<S, A>>,
    delivery_rx: Receiver<Delivery<S, A>>,
    depth: Cell<usize>,
    config: StoreConfig,
}

impl<S: 'static, A: 'static> Store<S, A> {
    /// Create a store without middleware
    pub fn new<R>(reducer: R, initial_state: S) -> Self
    where
        R: Fn(&S, &A) -> S + 'static,
    {
        Self::builder(reducer, initial_state).build()
    }

    /// Create a store whose middleware runs in list order
    pub fn with_middleware<R, I>(reducer: R, initial_state: S, middleware: I) -> Self
    where
        R: Fn(&S, &A) -> S + 'static,
        I: IntoIterator<Item = Middleware<S, A>>,
    {
        Self::builder(reducer, initial_state)
            .middleware(Middleware::concat_all(middleware))
            .build()
    }

    pub fn builder<R>(reducer: R, initial_state: S) -> StoreBuilder<S, A>
    where
        R: Fn(&S, &A) -> S + 'static,
    {
        StoreBuilder {
            reducer: Box::new(reducer),
            initial_state,
            middleware: Middleware::new(),
            observable: None,
            config: StoreConfig::default(),
        }
    }
}

impl<S, A> Store<S, A> {
    /// The last committed state
    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Dispatch an action through the middleware chain, then the reducer
    ///
    /// Every step of the chain sees the state as it is when the step runs. If the
    /// action survives, the reducer runs against the current state, the result
    /// replaces it and every subscriber is notified in subscription order before
    /// this returns.
    ///
    /// # Panics
    ///
    /// When nested dispatches exceed [`StoreConfig::max_dispatch_depth`].
    pub fn dispatch(&self, action: A) -> Dispatched<A> {
        let _depth = DepthGuard::enter(&self.depth, self.config.max_dispatch_depth);

        let get_state = || self.state();
        let Some(action) = self.middleware.run(&get_state, self, action) else {
            log::trace!("Action vetoed by middleware (depth {})", self.depth.get());
            return Dispatched::Vetoed;
        };

        let current = self.state();
        let next = Rc::new((self.reducer)(&current, &action));
        *self.state.borrow_mut() = Rc::clone(&next);

        self.observable.publish(&next);
        Dispatched::Reduced(action)
    }

    /// Evaluate an action creator against the current state and dispatch its action
    ///
    /// Returns `None` when the creator produced nothing.
    pub fn dispatch_creator<F>(&self, creator: F) -> Option<Dispatched<A>>
    where
        F: FnOnce(&S, &Self) -> Option<A>,
    {
        let state = self.state();
        let action = creator(&state, self)?;
        Some(self.dispatch(action))
    }

    /// Run an asynchronous action creator
    ///
    /// The creator receives a [`Dispatcher`] for delivering action creators,
    /// now or later, from any thread. Deliveries made before the creator returns
    /// are dispatched before this call returns; later ones wait for
    /// [`process_deliveries`](Store::process_deliveries).
    pub fn dispatch_async<F>(&self, creator: F)
    where
        F: FnOnce(&S, &Self, Dispatcher<S, A>),
    {
        self.run_async(creator, None);
    }

    /// Like [`dispatch_async`](Store::dispatch_async), calling `callback` with the
    /// new state once for every delivered creator that produced an action
    pub fn dispatch_async_with<F, C>(&self, creator: F, callback: C)
    where
        F: FnOnce(&S, &Self, Dispatcher<S, A>),
        C: Fn(&S) + Send + Sync + 'static,
    {
        self.run_async(creator, Some(Arc::new(callback)));
    }

    /// Handle for delivering action creators from other threads
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        Dispatcher::new(self.delivery_tx.clone(), None)
    }

    /// Dispatch every queued delivery, returning how many were processed
    pub fn process_deliveries(&self) -> usize {
        let mut processed = 0;
        while let Ok(delivery) = self.delivery_rx.try_recv() {
            self.run_delivery(delivery);
            processed += 1;
        }
        processed
    }

    /// Wait up to `timeout` for a delivery, then dispatch everything queued
    pub fn process_deliveries_timeout(&self, timeout: Duration) -> usize {
        match self.delivery_rx.recv_timeout(timeout) {
            Ok(delivery) => {
                self.run_delivery(delivery);
                1 + self.process_deliveries()
            }
            // The store keeps its own sender, so the channel never disconnects
            Err(_) => 0,
        }
    }

    /// Notify `callback` with every newly committed state
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Rc<S>) + 'static,
    {
        self.observable
            .subscribe(Box::new(move |state: &Rc<S>| callback(state)))
    }

    /// Notify `callback` with a selected part of the state, only when it changes
    ///
    /// The first comparison is against the selection of the state at subscribe
    /// time.
    pub fn subscribe_select<T, Sel, F>(&self, selector: Sel, callback: F) -> Subscription
    where
        Sel: Fn(&S) -> T + 'static,
        T: PartialEq + Clone + 'static,
        F: Fn(&T) + 'static,
    {
        let last = RefCell::new(selector(&self.state()));
        self.subscribe(move |state| {
            let selected = selector(state);
            if *last.borrow() == selected {
                return;
            }
            // Store before notifying so nested notifications compare against it
            *last.borrow_mut() = selected.clone();
            callback(&selected);
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.observable.subscriber_count()
    }

    fn run_async<F>(&self, creator: F, callback: Option<DispatchCallback<S>>)
    where
        F: FnOnce(&S, &Self, Dispatcher<S, A>),
    {
        let state = self.state();
        creator(&state, self, Dispatcher::new(self.delivery_tx.clone(), callback));
        self.process_deliveries();
    }

    fn run_delivery(&self, delivery: Delivery<S, A>) {
        let Delivery { creator, callback } = delivery;
        match self.dispatch_creator(creator) {
            Some(outcome) => {
                log::debug!("Delivered action creator dispatched (reduced: {})", outcome.is_reduced());
                if let Some(callback) = callback {
                    callback(&self.state());
                }
            }
            None => log::debug!("Delivered action creator produced no action"),
        }
    }
}

impl<S, A> Dispatch<A> for Store<S, A> {
    fn dispatch(&self, action: A) -> Dispatched<A> {
        Store::dispatch(self, action)
    }
}

/// Configures a [`Store`] before construction
pub struct StoreBuilder<S, A> {
    reducer: Reducer<S, A>,
    initial_state: S,
    middleware: Middleware<S, A>,
    observable: Option<Box<dyn Observable<Value = Rc<S>>>>,
    config: StoreConfig,
}

impl<S: 'static, A: 'static> StoreBuilder<S, A> {
    /// Append middleware after whatever was added before
    pub fn middleware(mut self, middleware: Middleware<S, A>) -> Self {
        self.middleware = self.middleware.concat(&middleware);
        self
    }

    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish states through `observable` instead of the default [`Subject`]
    pub fn observable<O>(mut self, observable: O) -> Self
    where
        O: Observable<Value = Rc<S>> + 'static,
    {
        self.observable = Some(Box::new(observable));
        self
    }

    pub fn build(self) -> Store<S, A> {
        let (delivery_tx, delivery_rx) = mpsc::channel();
        log::debug!(
            "Store created with {} middleware step(s), max dispatch depth {}",
            self.middleware.len(),
            self.config.max_dispatch_depth
        );
        Store {
            state: RefCell::new(Rc::new(self.initial_state)),
            reducer: self.reducer,
            middleware: self.middleware,
            observable: self
                .observable
                .unwrap_or_else(|| Box::new(Subject::<Rc<S>>::new())),
            delivery_tx,
            delivery_rx,
            depth: Cell::new(0),
            config: self.config,
        }
    }
}

/// Tracks dispatch nesting; leaves the level on drop, also when unwinding
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>, max_depth: usize) -> Self {
        let level = depth.get() + 1;
        if level > max_depth {
            log::error!("Dispatch depth {} exceeds limit of {}", level, max_depth);
            panic!(
                "dispatch nested {} levels deep (limit {}); middleware or a subscriber is dispatching recursively",
                level, max_depth
            );
        }
        depth.set(level);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    type AppMiddleware = Middleware<AppState, Action>;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct AppState {
        counter: i32,
        label: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Increment,
        Decrement,
        Add(i32),
        Rename(String),
    }

    fn reduce(state: &AppState, action: &Action) -> AppState {
        let mut state = state.clone();
        match action {
            Action::Increment => state.counter += 1,
            Action::Decrement => state.counter -= 1,
            Action::Add(n) => state.counter += n,
            Action::Rename(label) => state.label = label.clone(),
        }
        state
    }

    fn record_counters(store: &Store<AppState, Action>) -> (Rc<RefCell<Vec<i32>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = store.subscribe(move |state| sink.borrow_mut().push(state.counter));
        (seen, subscription)
    }

    #[test]
    fn test_three_increments_notify_each_value() {
        let store = Store::new(reduce, AppState::default());
        let (seen, _subscription) = record_counters(&store);

        for _ in 0..3 {
            store.dispatch(Action::Increment);
        }

        assert_eq!(store.state().counter, 3);
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_filtered_action_never_reduced() {
        let reductions = Rc::new(Cell::new(0));
        let counter = Rc::clone(&reductions);
        let counting_reducer = move |state: &AppState, action: &Action| {
            counter.set(counter.get() + 1);
            reduce(state, action)
        };
        let filter = AppMiddleware::new().filter(|_, action| *action != Action::Increment);
        let store = Store::with_middleware(counting_reducer, AppState::default(), [filter]);
        let (seen, _subscription) = record_counters(&store);

        let outcome = store.dispatch(Action::Increment);

        assert_eq!(outcome, Dispatched::Vetoed);
        assert_eq!(reductions.get(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_state_is_fold_of_surviving_actions() {
        let no_decrements = AppMiddleware::new().filter(|_, action| *action != Action::Decrement);
        let store = Store::with_middleware(reduce, AppState::default(), [no_decrements]);
        let actions = vec![
            Action::Increment,
            Action::Decrement,
            Action::Add(5),
            Action::Decrement,
            Action::Rename("done".to_string()),
            Action::Add(-2),
        ];

        for action in actions.clone() {
            store.dispatch(action);
        }

        let expected = actions
            .iter()
            .filter(|action| **action != Action::Decrement)
            .fold(AppState::default(), |state, action| reduce(&state, action));
        assert_eq!(*store.state(), expected);
    }

    #[test]
    fn test_dispatch_returns_rewritten_action() {
        let rewrite = AppMiddleware::new().map(|_, action| match action {
            Action::Increment => Action::Add(10),
            other => other,
        });
        let store = Store::with_middleware(reduce, AppState::default(), [rewrite]);

        assert_eq!(store.dispatch(Action::Increment), Dispatched::Reduced(Action::Add(10)));
        assert_eq!(store.state().counter, 10);
    }

    #[test]
    fn test_middleware_runs_in_list_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let first_log = Rc::clone(&order);
        let second_log = Rc::clone(&order);
        let first = AppMiddleware::new().side_effect(move |_, _, _| first_log.borrow_mut().push("first"));
        let second = AppMiddleware::new().side_effect(move |_, _, _| second_log.borrow_mut().push("second"));
        let store = Store::with_middleware(reduce, AppState::default(), [first, second]);

        store.dispatch(Action::Increment);

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_subscribers_notified_in_order_with_committed_state() {
        let store = Store::new(reduce, AppState::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let store_states = Rc::new(RefCell::new(Vec::new()));

        let a_log = Rc::clone(&log);
        let a_states = Rc::clone(&store_states);
        let _a = store.subscribe(move |state| {
            a_log.borrow_mut().push(format!("a:{}", state.counter));
            a_states.borrow_mut().push(Rc::clone(state));
        });
        let b_log = Rc::clone(&log);
        let _b = store.subscribe(move |state| b_log.borrow_mut().push(format!("b:{}", state.counter)));

        store.dispatch(Action::Add(2));

        assert_eq!(*log.borrow(), vec!["a:2", "b:2"]);
        // Subscribers receive the committed value itself
        assert!(Rc::ptr_eq(&store_states.borrow()[0], &store.state()));
    }

    #[test]
    fn test_disposed_subscriber_not_notified() {
        let store = Store::new(reduce, AppState::default());
        let (seen, subscription) = record_counters(&store);

        store.dispatch(Action::Increment);
        subscription.dispose();
        store.dispatch(Action::Increment);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_nested_dispatch_completes_before_outer_continues() {
        // Doubles every Add by dispatching an extra Increment first
        let nested = AppMiddleware::new().side_effect(|_, dispatch, action| {
            if let Action::Add(_) = action {
                dispatch.dispatch(Action::Increment);
            }
        });
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);
        let observer = AppMiddleware::new().side_effect(move |get_state, _, action| {
            sink.borrow_mut().push((action.clone(), get_state().counter));
        });
        let store = Store::with_middleware(reduce, AppState::default(), [nested, observer]);
        let (seen, _subscription) = record_counters(&store);

        store.dispatch(Action::Add(5));

        // The nested Increment was fully reduced before the outer chain resumed
        assert_eq!(
            *observed.borrow(),
            vec![(Action::Increment, 0), (Action::Add(5), 1)]
        );
        assert_eq!(*seen.borrow(), vec![1, 6]);
        assert_eq!(store.state().counter, 6);
    }

    #[test]
    fn test_side_effect_dispatch_does_not_change_forwarded_action() {
        let effect = AppMiddleware::new().side_effect(|_, dispatch, action| {
            if *action == Action::Increment {
                dispatch.dispatch(Action::Rename("bumped".to_string()));
            }
        });
        let store = Store::with_middleware(reduce, AppState::default(), [effect]);

        let outcome = store.dispatch(Action::Increment);

        assert_eq!(outcome, Dispatched::Reduced(Action::Increment));
        assert_eq!(
            *store.state(),
            AppState {
                counter: 1,
                label: "bumped".to_string(),
            }
        );
    }

    #[test]
    fn test_subscriber_can_dispatch() {
        let store = Rc::new(Store::new(reduce, AppState::default()));
        let weak = Rc::downgrade(&store);
        let _renamer = store.subscribe(move |state| {
            if state.counter == 1 && state.label != "one" {
                if let Some(store) = weak.upgrade() {
                    store.dispatch(Action::Rename("one".to_string()));
                }
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _recorder = store.subscribe(move |state| {
            sink.borrow_mut().push((state.counter, state.label.clone()));
        });

        store.dispatch(Action::Increment);

        assert_eq!(store.state().label, "one");
        // The nested dispatch notifies fully before the outer notification resumes
        assert_eq!(
            *seen.borrow(),
            vec![(1, "one".to_string()), (1, String::new())]
        );
    }

    #[test]
    #[should_panic(expected = "dispatch nested")]
    fn test_runaway_recursion_panics() {
        let forever = AppMiddleware::new().side_effect(|_, dispatch, _| {
            dispatch.dispatch(Action::Increment);
        });
        let store = Store::builder(reduce, AppState::default())
            .middleware(forever)
            .config(StoreConfig {
                max_dispatch_depth: 8,
                ..StoreConfig::default()
            })
            .build();

        store.dispatch(Action::Increment);
    }

    #[test]
    fn test_depth_resets_after_dispatch() {
        let once = AppMiddleware::new().side_effect(|get_state, dispatch, action| {
            if *action == Action::Increment && get_state().counter == 0 {
                dispatch.dispatch(Action::Add(1));
            }
        });
        let store = Store::builder(reduce, AppState::default())
            .middleware(once)
            .config(StoreConfig {
                max_dispatch_depth: 2,
                ..StoreConfig::default()
            })
            .build();

        for _ in 0..5 {
            store.dispatch(Action::Increment);
        }

        assert_eq!(store.state().counter, 6);
    }

    #[test]
    fn test_dispatch_creator() {
        let store = Store::new(reduce, AppState::default());

        let produced = store.dispatch_creator(|state, _| (state.counter == 0).then_some(Action::Add(3)));
        let skipped = store.dispatch_creator(|state, _| (state.counter == 0).then_some(Action::Add(3)));

        assert_eq!(produced, Some(Dispatched::Reduced(Action::Add(3))));
        assert_eq!(skipped, None);
        assert_eq!(store.state().counter, 3);
    }

    #[test]
    fn test_async_creator_guard_at_limit_dispatches_nothing() {
        let store = Store::new(reduce, AppState { counter: 5, ..AppState::default() });
        let (seen, _subscription) = record_counters(&store);
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let callback_calls = Arc::clone(&calls);

        store.dispatch_async_with(
            |_, _, dispatcher| {
                dispatcher
                    .deliver(|state: &AppState, _| (state.counter < 5).then_some(Action::Increment))
                    .unwrap();
            },
            move |_| {
                callback_calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            },
        );

        assert_eq!(store.state().counter, 5);
        assert!(seen.borrow().is_empty());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_async_immediate_delivery_dispatches_before_return() {
        let store = Store::new(reduce, AppState::default());
        let states = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&states);

        store.dispatch_async_with(
            |_, _, dispatcher| {
                dispatcher.deliver_action(Action::Increment).unwrap();
                dispatcher.deliver(|_, _| None).unwrap();
                dispatcher.deliver_action(Action::Add(2)).unwrap();
            },
            move |state: &AppState| sink.lock().unwrap().push(state.counter),
        );

        assert_eq!(store.state().counter, 3);
        // Once per produced action, never for the creator that returned nothing
        assert_eq!(*states.lock().unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_async_callback_runs_for_vetoed_action() {
        let veto_all = AppMiddleware::new().flat_map(|_, _| None);
        let store = Store::with_middleware(reduce, AppState::default(), [veto_all]);
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let callback_calls = Arc::clone(&calls);

        store.dispatch_async_with(
            |_, _, dispatcher| dispatcher.deliver_action(Action::Increment).unwrap(),
            move |_| {
                callback_calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            },
        );

        assert_eq!(store.state().counter, 0);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_async_delivery_from_worker_thread() {
        let store = Store::new(reduce, AppState::default());
        let (seen, _subscription) = record_counters(&store);
        let (go_tx, go_rx) = mpsc::channel::<()>();
        let mut worker = None;

        store.dispatch_async(|state, _, dispatcher| {
            let start = state.counter;
            worker = Some(thread::spawn(move || {
                go_rx.recv().unwrap();
                dispatcher
                    .deliver(move |state: &AppState, _| {
                        // Evaluated on the store thread against the state at delivery time
                        (state.counter == start + 1).then_some(Action::Add(10))
                    })
                    .unwrap();
            }));
        });

        // Not delivered yet; bump the counter so the guard passes
        store.dispatch(Action::Increment);
        go_tx.send(()).unwrap();
        worker.unwrap().join().unwrap();

        assert_eq!(store.process_deliveries_timeout(Duration::from_secs(5)), 1);
        assert_eq!(store.state().counter, 11);
        assert_eq!(*seen.borrow(), vec![1, 11]);
    }

    #[test]
    fn test_never_delivering_creator_is_noop() {
        let store = Store::new(reduce, AppState::default());
        store.dispatch_async(|_, _, _dispatcher| {});

        assert_eq!(store.process_deliveries(), 0);
        assert_eq!(store.process_deliveries_timeout(Duration::from_millis(10)), 0);
        assert_eq!(*store.state(), AppState::default());
    }

    #[test]
    fn test_dispatcher_fails_after_store_dropped() {
        let store: Store<AppState, Action> = Store::new(reduce, AppState::default());
        let dispatcher = store.dispatcher();
        drop(store);

        assert!(dispatcher.deliver_action(Action::Increment).is_err());
    }

    #[test]
    fn test_subscribe_select_skips_repeats() {
        let store = Store::new(reduce, AppState::default());
        let labels = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&labels);
        let _subscription = store.subscribe_select(
            |state: &AppState| state.label.clone(),
            move |label: &String| sink.borrow_mut().push(label.clone()),
        );

        store.dispatch(Action::Increment);
        store.dispatch(Action::Rename("a".to_string()));
        store.dispatch(Action::Rename("a".to_string()));
        store.dispatch(Action::Increment);
        store.dispatch(Action::Rename("b".to_string()));

        assert_eq!(*labels.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_custom_observable_receives_states() {
        struct CountingObservable {
            inner: Subject<Rc<AppState>>,
            published: Rc<Cell<usize>>,
        }

        impl Observable for CountingObservable {
            type Value = Rc<AppState>;

            fn publish(&self, value: &Rc<AppState>) {
                self.published.set(self.published.get() + 1);
                self.inner.publish(value);
            }

            fn subscribe(&self, callback: Box<dyn Fn(&Rc<AppState>)>) -> Subscription {
                self.inner.subscribe(callback)
            }

            fn subscriber_count(&self) -> usize {
                self.inner.subscriber_count()
            }
        }

        let published = Rc::new(Cell::new(0));
        let store = Store::builder(reduce, AppState::default())
            .observable(CountingObservable {
                inner: Subject::new(),
                published: Rc::clone(&published),
            })
            .build();
        let (seen, _subscription) = record_counters(&store);

        store.dispatch(Action::Increment);
        store.dispatch(Action::Increment);

        assert_eq!(published.get(), 2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}

//! Counter middleware
//!
//! Chain order matters: `normalize` rewrites before `bounded` checks, so the
//! guard only has to reason about `Add` and `SlowIncrementLanded`.

use unistate::Middleware;

use crate::actions::Action;
use crate::state::CounterState;

pub type CounterMiddleware = Middleware<CounterState, Action>;

/// Rewrite `Increment`/`Decrement` into `Add`
pub fn normalize() -> CounterMiddleware {
    CounterMiddleware::new().map(|_, action| match action {
        Action::Increment => Action::Add(1),
        Action::Decrement => Action::Add(-1),
        other => other,
    })
}

/// Veto any change that would take the counter below zero or past `i64::MAX`
pub fn bounded() -> CounterMiddleware {
    CounterMiddleware::new().flat_map(|get_state, action| {
        let delta = match action {
            Action::Add(n) => n,
            Action::SlowIncrementLanded => 1,
            _ => return Some(action),
        };
        match get_state().counter.checked_add(delta) {
            Some(next) if next >= 0 => Some(action),
            Some(_) => {
                log::info!("Rejected {:?}: counter would go negative", action);
                None
            }
            None => {
                log::info!("Rejected {:?}: counter would overflow", action);
                None
            }
        }
    })
}

/// Drop everything except `Quit` once the app has stopped
pub fn stopped_guard() -> CounterMiddleware {
    CounterMiddleware::new().filter(|get_state, action| get_state().running || *action == Action::Quit)
}

/// The full chain, optionally prefixed with action logging
pub fn chain(log_actions: bool) -> CounterMiddleware {
    let logging = if log_actions {
        unistate::middleware::logging()
    } else {
        Middleware::identity()
    };
    [logging, stopped_guard(), normalize(), bounded()]
        .into_iter()
        .collect()
}

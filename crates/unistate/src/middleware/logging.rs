use std::fmt::Debug;

use super::Middleware;

/// Logs every action that passes through, forwarding it unchanged
///
/// Place it first in the chain to see every dispatched action, or last to see
/// only the actions that will reach the reducer.
pub fn logging<S, A: Debug>() -> Middleware<S, A> {
    Middleware::new().side_effect(|_get_state, _dispatch, action: &A| {
        log::debug!("Action: {:?}", action);
    })
}

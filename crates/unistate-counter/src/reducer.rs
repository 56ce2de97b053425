use crate::actions::Action;
use crate::state::CounterState;

/// Reducer - pure function that produces new state from current state + action
pub fn reduce(state: &CounterState, action: &Action) -> CounterState {
    let mut state = state.clone();
    match action {
        Action::Increment => state.counter = state.counter.saturating_add(1),
        Action::Decrement => state.counter = state.counter.saturating_sub(1),
        Action::Add(n) => state.counter = state.counter.saturating_add(*n),
        Action::Reset => state.counter = 0,
        Action::SlowIncrementStarted => state.pending += 1,
        Action::SlowIncrementLanded => {
            state.pending = state.pending.saturating_sub(1);
            state.counter = state.counter.saturating_add(1);
        }
        Action::Quit => state.running = false,
    }
    state
}

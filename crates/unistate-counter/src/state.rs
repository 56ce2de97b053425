/// Application state for the counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub counter: i64,
    /// Slow increments started but not yet landed
    pub pending: usize,
    pub running: bool,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            counter: 0,
            pending: 0,
            running: true,
        }
    }
}

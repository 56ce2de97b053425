/// Actions represent all possible state changes in the counter application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Increment,
    Decrement,
    Add(i64),
    Reset,

    /// ## Slow increment (delivered from a worker thread)
    SlowIncrementStarted,
    SlowIncrementLanded,

    Quit,
}

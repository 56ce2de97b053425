/// Reducer - pure function that produces new state from current state + action
///
/// Reducers must return the unchanged state for actions they do not handle.
pub type Reducer<S, A> = Box<dyn Fn(&S, &A) -> S>;

/// Combine several reducers into a root reducer
///
/// Each reducer receives the output of the previous one, in list order. An empty
/// list yields a reducer that returns a copy of the state.
pub fn combine<S, A>(reducers: Vec<Reducer<S, A>>) -> Reducer<S, A>
where
    S: Clone + 'static,
    A: 'static,
{
    Box::new(move |state: &S, action: &A| {
        reducers
            .iter()
            .fold(None, |reduced: Option<S>, reducer| {
                Some(reducer(reduced.as_ref().unwrap_or(state), action))
            })
            .unwrap_or_else(|| state.clone())
    })
}

//! Reducer trait for state transitions.

use super::event::Event;
use super::state::UiState;

/// Reducer transforms state based on events.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Event) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The event type this reducer handles.
    type Event: Event;

    /// Process an event and return the new state.
    fn reduce(state: Self::State, event: Self::Event) -> Self::State;
}

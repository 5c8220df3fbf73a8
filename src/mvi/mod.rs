//! Model-View-Event primitives for the engine's observable state.
//!
//! # Architecture
//!
//! ```text
//! Event ──→ Reducer ──→ State ──→ View
//!   ↑                              │
//!   └──────────────────────────────┘
//! ```
//!
//! - **State**: Self-contained snapshot the UI renders
//! - **Event**: Completed engine step (page arrived, batch consumed, failure)
//! - **Reducer**: Pure function that transforms state based on events

mod event;
mod reducer;
mod state;

pub use event::Event;
pub use reducer::Reducer;
pub use state::UiState;

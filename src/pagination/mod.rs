//! Display pagination: the visible list, its reducer and the provider page cursor.

mod buffer;
mod reducer;
mod state;

pub use buffer::{CursorStep, ProviderPageBuffer};
pub use reducer::{PaginationEvent, PaginationReducer};
pub use state::PaginationState;

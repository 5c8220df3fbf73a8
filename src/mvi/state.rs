//! Base trait for observable state.

/// Marker trait for state objects.
///
/// States should be:
/// - Cheap to move (reducers take and return them by value)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

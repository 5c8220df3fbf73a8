use crate::error::SearchError;
use crate::pagination::PaginationState;
use crate::provider::Card;
use crate::sort::SortState;

/// Read-only snapshot handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchView {
    pub items: Vec<Card>,
    pub total_count: u64,
    pub loaded_count: u64,
    pub has_more: bool,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub error: Option<SearchError>,
    /// Sort the user selected; `items` reach this order once a remote
    /// re-sort lands.
    pub sort: SortState,
    pub degradation_level: u8,
}

impl SearchView {
    pub(crate) fn from_state(
        state: &PaginationState,
        sort: SortState,
        degradation_level: u8,
    ) -> Self {
        Self {
            items: state.items.clone(),
            total_count: state.total_count,
            loaded_count: state.loaded_count,
            has_more: state.has_more,
            is_loading: state.is_loading,
            is_loading_more: state.is_loading_more,
            error: state.error.clone(),
            sort,
            degradation_level,
        }
    }
}

/// What an engine operation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The visible state changed.
    Applied,
    /// A newer intent took over; nothing was applied.
    Superseded,
    /// Nothing to do (no more results, already loading).
    Skipped,
    /// The operation failed and the error is now visible.
    Failed(SearchError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

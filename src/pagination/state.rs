use crate::error::SearchError;
use crate::mvi::UiState;
use crate::provider::Card;
use crate::query::SearchFilters;
use crate::sort::SortState;

/// What the user is currently looking at.
///
/// Replaced wholesale by a new search, extended by load-more. `items` never
/// holds the same card twice and never shrinks on load-more.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaginationState {
    /// Cards in display order.
    pub items: Vec<Card>,
    /// Total matches the provider reports for the active query.
    pub total_count: u64,
    /// Always `items.len()`.
    pub loaded_count: u64,
    /// `loaded_count < total_count`.
    pub has_more: bool,
    /// A fresh search or remote re-sort is in flight.
    pub is_loading: bool,
    /// A load-more fetch is in flight.
    pub is_loading_more: bool,
    /// Text that produced `items`.
    pub last_query: String,
    /// Filters that produced `items`.
    pub last_filters: SearchFilters,
    /// Order `items` are in.
    pub last_sort: SortState,
    pub error: Option<SearchError>,
}

impl UiState for PaginationState {}

impl PaginationState {
    /// Recompute the derived counters after `items` or `total_count` changed.
    pub(crate) fn sync_counts(&mut self) {
        self.loaded_count = self.items.len() as u64;
        self.has_more = self.loaded_count < self.total_count;
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_loading_more
    }
}

//! Pure state transitions for [`PaginationState`].

use crate::error::SearchError;
use crate::mvi::{Event, Reducer};
use crate::pagination::PaginationState;
use crate::provider::Card;
use crate::query::SearchFilters;
use crate::sort::{sort_local, SortState};

/// Engine steps that change what the user sees.
#[derive(Debug, Clone)]
pub enum PaginationEvent {
    /// A fresh search or remote re-sort was issued.
    SearchStarted,

    /// A new first batch replaces the list.
    PageReplaced {
        items: Vec<Card>,
        total_count: u64,
        query: String,
        filters: SearchFilters,
        sort: SortState,
    },

    /// A load-more fetch was issued.
    LoadMoreStarted,

    /// A batch was appended to the list.
    ItemsAppended { items: Vec<Card> },

    /// The provider has no pages left; the loaded list is the whole result set.
    TotalClamped,

    /// Everything is loaded; reorder in place.
    Resorted { sort: SortState },

    /// The current fresh search failed.
    SearchFailed { error: SearchError },

    /// The current load-more failed.
    LoadMoreFailed { error: SearchError },

    /// The user cleared the search.
    Cleared,
}

impl Event for PaginationEvent {}

pub struct PaginationReducer;

impl Reducer for PaginationReducer {
    type State = PaginationState;
    type Event = PaginationEvent;

    fn reduce(mut state: Self::State, event: Self::Event) -> Self::State {
        match event {
            PaginationEvent::SearchStarted => {
                state.is_loading = true;
                state.error = None;
                state
            }

            PaginationEvent::PageReplaced {
                items,
                total_count,
                query,
                filters,
                sort,
            } => {
                let mut next = PaginationState {
                    items,
                    total_count,
                    last_query: query,
                    last_filters: filters,
                    last_sort: sort,
                    ..PaginationState::default()
                };
                next.sync_counts();
                next
            }

            PaginationEvent::LoadMoreStarted => {
                state.is_loading_more = true;
                state.error = None;
                state
            }

            PaginationEvent::ItemsAppended { items } => {
                state.items.extend(items);
                state.is_loading_more = false;
                state.sync_counts();
                state
            }

            PaginationEvent::TotalClamped => {
                state.total_count = state.items.len() as u64;
                state.is_loading_more = false;
                state.sync_counts();
                state
            }

            PaginationEvent::Resorted { sort } => {
                sort_local(&mut state.items, sort);
                state.last_sort = sort;
                state
            }

            PaginationEvent::SearchFailed { error } => PaginationState {
                last_query: state.last_query,
                last_filters: state.last_filters,
                last_sort: state.last_sort,
                error: Some(error),
                ..PaginationState::default()
            },

            PaginationEvent::LoadMoreFailed { error } => {
                state.is_loading_more = false;
                state.error = Some(error);
                state
            }

            PaginationEvent::Cleared => PaginationState {
                last_sort: state.last_sort,
                ..PaginationState::default()
            },
        }
    }
}

use crate::pagination::PaginationState;
use crate::provider::ProviderSort;
use crate::sort::{SortCriterion, SortDirection, SortState};

/// How a sort change must be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortDecision {
    /// Everything is loaded; re-sort in place.
    Local,
    /// Loaded items are an incomplete prefix; re-query page 1 with this order.
    Remote { provider_sort: ProviderSort },
}

impl SortDecision {
    pub fn mode(&self) -> &'static str {
        match self {
            SortDecision::Local => "local",
            SortDecision::Remote { .. } => "remote",
        }
    }
}

/// Chooses between local re-sort and remote re-query.
#[derive(Debug, Clone, Copy)]
pub struct SortPolicy {
    threshold: u64,
}

impl SortPolicy {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn decide(
        &self,
        criterion: SortCriterion,
        direction: SortDirection,
        state: &PaginationState,
    ) -> SortDecision {
        // A small total is not enough: the provider may page below the threshold.
        let incomplete = state.has_more || state.is_loading_more;
        if state.total_count > self.threshold || incomplete {
            SortDecision::Remote {
                provider_sort: SortState::new(criterion, direction).provider_sort(),
            }
        } else {
            SortDecision::Local
        }
    }
}

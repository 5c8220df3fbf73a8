use serde::{Deserialize, Serialize};

use crate::provider::ProviderSort;

/// A column the user can sort a card list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    #[default]
    Name,
    ManaValue,
    Color,
    Rarity,
    Set,
    Power,
    Toughness,
    Price,
    Released,
}

impl SortCriterion {
    /// The provider's native sort key for this criterion.
    pub fn provider_key(self) -> &'static str {
        match self {
            SortCriterion::Name => "name",
            SortCriterion::ManaValue => "cmc",
            SortCriterion::Color => "color",
            SortCriterion::Rarity => "rarity",
            SortCriterion::Set => "set",
            SortCriterion::Power => "power",
            SortCriterion::Toughness => "toughness",
            SortCriterion::Price => "usd",
            SortCriterion::Released => "released",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort selection of one list area.
///
/// The search results own one of these; deck and sideboard views own
/// independent instances that are only ever applied locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub criterion: SortCriterion,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(criterion: SortCriterion, direction: SortDirection) -> Self {
        Self {
            criterion,
            direction,
        }
    }

    /// State after the user clicks the header for `criterion`.
    ///
    /// Clicking the active column flips its direction; a new column starts ascending.
    pub fn toggled(self, criterion: SortCriterion) -> Self {
        if self.criterion == criterion {
            Self::new(criterion, self.direction.reversed())
        } else {
            Self::new(criterion, SortDirection::Asc)
        }
    }

    pub fn provider_sort(self) -> ProviderSort {
        ProviderSort {
            field: self.criterion.provider_key(),
            direction: self.direction,
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sort::SortDirection;

/// A catalog card.
///
/// Only the fields needed for identity and ordering are typed; every other
/// field the provider sends is kept verbatim in `extra` for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Stable provider identity. Two cards with the same id are the same card.
    pub id: String,
    pub name: String,
    #[serde(default, rename = "cmc")]
    pub mana_value: f64,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub prices: Prices,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<String>,
}

impl Card {
    /// Create a card with the given identity and empty ordering fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mana_value: 0.0,
            colors: Vec::new(),
            rarity: String::new(),
            set: String::new(),
            type_line: String::new(),
            power: None,
            toughness: None,
            released_at: None,
            prices: Prices::default(),
            extra: Map::new(),
        }
    }

    pub fn with_mana_value(mut self, mana_value: f64) -> Self {
        self.mana_value = mana_value;
        self
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    /// USD price as a number, if the provider reported one.
    pub fn price_usd(&self) -> Option<f64> {
        self.prices.usd.as_deref().and_then(|p| p.parse().ok())
    }
}

/// Provider-native sort parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSort {
    pub field: &'static str,
    pub direction: SortDirection,
}

/// One call to the upstream search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    /// Opaque provider query string.
    pub query: String,
    /// 1-based provider page index.
    pub page: u32,
    pub sort: ProviderSort,
}

/// One page of results as paginated by the provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProviderPage {
    pub items: Vec<Card>,
    pub total_count: u64,
    pub has_more: bool,
}

impl ProviderPage {
    /// The page returned when nothing matched.
    pub fn empty() -> Self {
        Self::default()
    }
}

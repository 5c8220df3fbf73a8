use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sort::{SortCriterion, SortDirection};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Upstream search provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the API (e.g., "https://api.scryfall.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the search endpoint, appended to `base_url`.
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Total request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Extra query parameters appended to every search call.
    #[serde(default = "default_extra_params")]
    pub extra_params: BTreeMap<String, String>,
}

/// Display pagination settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Number of cards added to the visible list per batch (default: 75).
    #[serde(default = "default_display_batch_size")]
    pub display_batch_size: usize,
}

/// Search-results sort settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Result sets larger than this are re-sorted by the provider (default: 75).
    #[serde(default = "default_local_sort_threshold")]
    pub local_sort_threshold: u64,
    /// How long a superseded remote re-sort may still be applied (default: 3000).
    #[serde(default = "default_grace_window_ms")]
    pub grace_window_ms: u64,
    #[serde(default)]
    pub default_criterion: SortCriterion,
    #[serde(default)]
    pub default_direction: SortDirection,
}

/// Query building settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Provider-native token matching every card (default: "*").
    #[serde(default = "default_match_all_token")]
    pub match_all_token: String,
}

/// Health monitor tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Weight of the newest sample in the rolling latency average (default: 0.3).
    #[serde(default = "default_latency_alpha")]
    pub latency_alpha: f64,
    /// Responses slower than this are suspicious (default: 3000).
    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,
    /// Queries at most this long count as "short" (default: 3).
    #[serde(default = "default_short_query_max_len")]
    pub short_query_max_len: usize,
    /// Short queries returning more than this are suspicious (default: 5000).
    #[serde(default = "default_implausible_result_count")]
    pub implausible_result_count: u64,
    /// Consecutive suspicious responses needed to degrade (default: 2).
    #[serde(default = "default_suspicious_run")]
    pub suspicious_run: u32,
    /// Consecutive healthy responses needed to recover one level (default: 3).
    #[serde(default = "default_recovery_run")]
    pub recovery_run: u32,
    /// Highest degradation level (default: 5).
    #[serde(default = "default_max_level")]
    pub max_level: u8,
    /// Added inter-request delay per degradation level (default: 250).
    #[serde(default = "default_delay_step_ms")]
    pub delay_step_ms: u64,
}

fn default_base_url() -> String {
    "https://api.scryfall.com".to_string()
}

fn default_search_path() -> String {
    "/cards/search".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_user_agent() -> String {
    format!("deckscout/{}", env!("CARGO_PKG_VERSION"))
}

fn default_extra_params() -> BTreeMap<String, String> {
    BTreeMap::from([("unique".to_string(), "cards".to_string())])
}

fn default_display_batch_size() -> usize {
    75
}

fn default_local_sort_threshold() -> u64 {
    75
}

fn default_grace_window_ms() -> u64 {
    3000
}

fn default_match_all_token() -> String {
    "*".to_string()
}

fn default_latency_alpha() -> f64 {
    0.3
}

fn default_slow_threshold_ms() -> u64 {
    3000
}

fn default_short_query_max_len() -> usize {
    3
}

fn default_implausible_result_count() -> u64 {
    5000
}

fn default_suspicious_run() -> u32 {
    2
}

fn default_recovery_run() -> u32 {
    3
}

fn default_max_level() -> u8 {
    5
}

fn default_delay_step_ms() -> u64 {
    250
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
            extra_params: default_extra_params(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            display_batch_size: default_display_batch_size(),
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            local_sort_threshold: default_local_sort_threshold(),
            grace_window_ms: default_grace_window_ms(),
            default_criterion: SortCriterion::default(),
            default_direction: SortDirection::default(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            match_all_token: default_match_all_token(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            latency_alpha: default_latency_alpha(),
            slow_threshold_ms: default_slow_threshold_ms(),
            short_query_max_len: default_short_query_max_len(),
            implausible_result_count: default_implausible_result_count(),
            suspicious_run: default_suspicious_run(),
            recovery_run: default_recovery_run(),
            max_level: default_max_level(),
            delay_step_ms: default_delay_step_ms(),
        }
    }
}

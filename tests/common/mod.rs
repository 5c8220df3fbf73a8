//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;
pub mod scripted_provider;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use deckscout::provider::Card;
use deckscout::{Config, SearchEngine};
use tempfile::TempDir;

use scripted_provider::ScriptedProvider;

/// Provider page size of the live catalog.
pub const PAGE_SIZE: usize = 175;

pub fn test_config() -> Config {
    Config::default()
}

/// Engine over a scripted provider, plus a handle to script it.
pub fn scripted_engine() -> (Arc<SearchEngine<ScriptedProvider>>, ScriptedProvider) {
    scripted_engine_with(ScriptedProvider::new(PAGE_SIZE))
}

/// Engine over a provider whose pages hold `page_size` cards.
pub fn scripted_engine_paged(
    page_size: usize,
) -> (Arc<SearchEngine<ScriptedProvider>>, ScriptedProvider) {
    scripted_engine_with(ScriptedProvider::new(page_size))
}

pub fn scripted_engine_with(
    provider: ScriptedProvider,
) -> (Arc<SearchEngine<ScriptedProvider>>, ScriptedProvider) {
    let engine = Arc::new(SearchEngine::new(provider.clone(), &test_config()));
    (engine, provider)
}

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn ids(items: &[Card]) -> Vec<&str> {
    items.iter().map(|c| c.id.as_str()).collect()
}

pub fn assert_unique(items: &[Card]) {
    let mut seen = HashSet::new();
    for card in items {
        assert!(seen.insert(card.id.as_str()), "duplicate card {}", card.id);
    }
}

pub fn all_tagged(items: &[Card], tag: &str) -> bool {
    let prefix = format!("{}-", tag);
    items.iter().all(|c| c.id.starts_with(&prefix))
}

//! In-process search provider over a synthetic catalog.
//!
//! Each registered tag owns `total` cards with ids `{tag}-{i:04}`; a request
//! whose query mentions the tag is answered from that slice. Calls can be
//! held until the test releases them, failed once, or slowed down.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use deckscout::provider::{Card, ProviderError, ProviderPage, ProviderRequest, SearchProvider};
use deckscout::sort::{sort_local, SortCriterion, SortState};
use parking_lot::Mutex;
use tokio::sync::oneshot;

const COLORS: [&[&str]; 6] = [&["W"], &["U"], &["B"], &["R"], &["G"], &[]];
const RARITIES: [&str; 4] = ["common", "uncommon", "rare", "mythic"];
const CRITERIA: [SortCriterion; 9] = [
    SortCriterion::Name,
    SortCriterion::ManaValue,
    SortCriterion::Color,
    SortCriterion::Rarity,
    SortCriterion::Set,
    SortCriterion::Power,
    SortCriterion::Toughness,
    SortCriterion::Price,
    SortCriterion::Released,
];

#[derive(Debug, Clone)]
struct Listing {
    tag: String,
    total: usize,
    /// Reported total when it differs from what is actually served.
    reported_total: Option<u64>,
}

#[derive(Default)]
struct Script {
    listings: Vec<Listing>,
    gates: VecDeque<Option<oneshot::Receiver<()>>>,
    failures: VecDeque<Option<ProviderError>>,
    latency: Duration,
}

/// Releases one held provider call.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

#[derive(Clone)]
pub struct ScriptedProvider {
    page_size: usize,
    overlap: usize,
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<ProviderRequest>>>,
}

impl ScriptedProvider {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            overlap: 0,
            script: Arc::new(Mutex::new(Script::default())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Start every page after the first `overlap` cards early, repeating the
    /// tail of the previous page.
    pub fn with_page_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn register(&self, tag: &str, total: usize) {
        self.script.lock().listings.push(Listing {
            tag: tag.to_string(),
            total,
            reported_total: None,
        });
    }

    /// Register a listing whose reported total overstates what is served.
    pub fn register_overstated(&self, tag: &str, total: usize, reported_total: u64) {
        self.script.lock().listings.push(Listing {
            tag: tag.to_string(),
            total,
            reported_total: Some(reported_total),
        });
    }

    /// Hold the next call that does not already have a gate.
    pub fn hold_next(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.script.lock().gates.push_back(Some(rx));
        Gate(tx)
    }

    /// Let the next call through without holding it.
    pub fn pass_next(&self) {
        self.script.lock().gates.push_back(None);
    }

    /// Fail the next call that does not already have a scripted failure.
    pub fn fail_next(&self, error: ProviderError) {
        self.script.lock().failures.push_back(Some(error));
    }

    /// Answer the next call normally.
    pub fn succeed_next(&self) {
        self.script.lock().failures.push_back(None);
    }

    pub fn set_latency(&self, latency: Duration) {
        self.script.lock().latency = latency;
    }

    pub fn calls(&self) -> Vec<ProviderRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Yield until at least `n` calls have reached the provider.
    pub async fn wait_for_calls(&self, n: usize) {
        for _ in 0..10_000 {
            if self.call_count() >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {} provider calls, saw {}", n, self.call_count());
    }

    fn catalog(listing: &Listing, sort: SortState) -> Vec<Card> {
        let mut cards: Vec<Card> = (0..listing.total)
            .map(|i| {
                let mut card = Card::new(
                    format!("{}-{:04}", listing.tag, i),
                    format!("{} {:04}", listing.tag, (i * 37) % 1000),
                )
                .with_mana_value(((i * 7) % 11) as f64)
                .with_colors(COLORS[i % COLORS.len()])
                .with_rarity(RARITIES[i % RARITIES.len()]);
                card.set = format!("s{}", i % 5);
                card
            })
            .collect();
        sort_local(&mut cards, sort);
        cards
    }

    fn answer(&self, request: &ProviderRequest) -> Result<ProviderPage, ProviderError> {
        let listing = self
            .script
            .lock()
            .listings
            .iter()
            .find(|l| request.query.contains(&l.tag))
            .cloned();

        let Some(listing) = listing else {
            return Ok(ProviderPage::empty());
        };

        let criterion = CRITERIA
            .into_iter()
            .find(|c| c.provider_key() == request.sort.field)
            .unwrap_or_default();
        let catalog = Self::catalog(
            &listing,
            SortState::new(criterion, request.sort.direction),
        );

        let page = request.page.max(1) as usize;
        let start = if page == 1 {
            0
        } else {
            ((page - 1) * self.page_size).saturating_sub(self.overlap)
        };
        if start >= catalog.len() && !catalog.is_empty() {
            return Err(ProviderError::Rejected {
                status: 422,
                code: "bad_request".to_string(),
                details: format!("page {} is out of range", page),
            });
        }
        let end = (page * self.page_size).min(catalog.len());

        Ok(ProviderPage {
            items: catalog[start..end].to_vec(),
            total_count: listing
                .reported_total
                .unwrap_or(listing.total as u64),
            has_more: end < catalog.len(),
        })
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn search(&self, request: &ProviderRequest) -> Result<ProviderPage, ProviderError> {
        self.calls.lock().push(request.clone());

        let (gate, failure, latency) = {
            let mut script = self.script.lock();
            (
                script.gates.pop_front().flatten(),
                script.failures.pop_front().flatten(),
                script.latency,
            )
        };

        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if let Some(error) = failure {
            return Err(error);
        }

        self.answer(request)
    }
}

//! Search coordination engine.
//!
//! Owns the visible result list and decides, for every user action, whether
//! to serve it from the buffered provider page, sort locally, or issue a
//! provider request, and whether that request's result is still wanted when
//! it arrives. State lives behind one mutex that is never held across an
//! `.await`; ordering between overlapping requests is the sequencer's job.

mod view;

pub use view::{Outcome, SearchView};

use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::config::Config;
use crate::error::SearchError;
use crate::health::{ApiHealth, HealthMonitor};
use crate::mvi::Reducer;
use crate::pagination::{
    CursorStep, PaginationEvent, PaginationReducer, PaginationState, ProviderPageBuffer,
};
use crate::provider::{HttpProvider, ProviderError, ProviderPage, ProviderRequest, SearchProvider};
use crate::query::{QueryBuilder, SearchFilters};
use crate::sequencer::{Admission, IntentId, IntentKind, SearchIntent, SequencerState};
use crate::sort::{SortCriterion, SortDecision, SortDirection, SortPolicy, SortState};

type FetchResult = (Result<ProviderPage, ProviderError>, Duration);

pub struct SearchEngine<P> {
    provider: P,
    builder: QueryBuilder,
    sort_policy: SortPolicy,
    display_batch_size: usize,
    inner: Mutex<EngineInner>,
    view_tx: watch::Sender<SearchView>,
}

struct EngineInner {
    sequencer: SequencerState,
    health: HealthMonitor,
    pagination: PaginationState,
    buffer: Option<ProviderPageBuffer>,
    /// Sort the user selected for the search results.
    sort: SortState,
    /// Inputs of the latest search, applied or not.
    requested_text: String,
    requested_filters: SearchFilters,
    /// Latest list-replacing intent that has not resolved yet.
    replace_in_flight: Option<IntentId>,
}

impl EngineInner {
    fn dispatch(&mut self, event: PaginationEvent) {
        let state = std::mem::take(&mut self.pagination);
        self.pagination = PaginationReducer::reduce(state, event);
    }

    fn view(&self) -> SearchView {
        SearchView::from_state(&self.pagination, self.sort, self.health.degradation_level())
    }

    /// Move the next display batch from the buffer into the list.
    fn consume_batch(&mut self, batch_size: usize) -> usize {
        let Some(buffer) = self.buffer.as_mut() else {
            return 0;
        };
        let batch = buffer.take_batch(batch_size, &self.pagination.items);
        let appended = batch.len();
        self.dispatch(PaginationEvent::ItemsAppended { items: batch });
        appended
    }

    /// End pagination when the provider has nothing left but the reported
    /// total says otherwise.
    fn clamp_if_exhausted(&mut self) {
        let exhausted = self
            .buffer
            .as_ref()
            .map_or(true, |b| b.plan() == CursorStep::Exhausted);

        if exhausted && self.pagination.has_more {
            tracing::warn!(
                loaded = self.pagination.loaded_count,
                total = self.pagination.total_count,
                "Provider has no further pages, clamping total"
            );
            self.dispatch(PaginationEvent::TotalClamped);
        }
    }

    fn settle_replace(&mut self, id: IntentId) {
        if self.replace_in_flight == Some(id) {
            self.replace_in_flight = None;
        }
    }

    /// Feed a response into the health monitor. Rejections say nothing
    /// about provider health.
    fn observe(
        &mut self,
        intent: &SearchIntent,
        result: &Result<ProviderPage, ProviderError>,
        elapsed: Duration,
    ) {
        let result_count = match result {
            Ok(page) => page.total_count,
            Err(err) if err.is_rejection() => return,
            Err(_) => 0,
        };
        self.health
            .record_result(elapsed, result_count, intent.query_text.chars().count());
    }
}

impl<P: SearchProvider> SearchEngine<P> {
    pub fn new(provider: P, config: &Config) -> Self {
        let sort = SortState::new(config.sort.default_criterion, config.sort.default_direction);
        let inner = EngineInner {
            sequencer: SequencerState::new(Duration::from_millis(config.sort.grace_window_ms)),
            health: HealthMonitor::new(config.health.clone()),
            pagination: PaginationState {
                last_sort: sort,
                ..PaginationState::default()
            },
            buffer: None,
            sort,
            requested_text: String::new(),
            requested_filters: SearchFilters::default(),
            replace_in_flight: None,
        };
        let (view_tx, _) = watch::channel(inner.view());

        Self {
            provider,
            builder: QueryBuilder::new(config.query.match_all_token.clone()),
            sort_policy: SortPolicy::new(config.sort.local_sort_threshold),
            display_batch_size: config.paging.display_batch_size,
            inner: Mutex::new(inner),
            view_tx,
        }
    }

    /// Current snapshot of the visible state.
    pub fn view(&self) -> SearchView {
        self.inner.lock().view()
    }

    /// Receiver that is updated after every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view_tx.subscribe()
    }

    pub fn health(&self) -> ApiHealth {
        self.inner.lock().health.snapshot()
    }

    pub fn current_sort(&self) -> SortState {
        self.inner.lock().sort
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Start a new search, replacing the list once results arrive.
    ///
    /// Empty text with no filters clears the list without a request.
    pub async fn search(&self, text: &str, filters: SearchFilters) -> Outcome {
        let text = text.trim().to_string();

        let (intent, sort, delay) = {
            let mut inner = self.inner.lock();

            if text.is_empty() && filters.is_empty() {
                inner.sequencer.invalidate();
                inner.buffer = None;
                inner.replace_in_flight = None;
                inner.requested_text.clear();
                inner.requested_filters = SearchFilters::default();
                inner.dispatch(PaginationEvent::Cleared);
                self.publish(&inner);
                tracing::debug!("Search cleared");
                return Outcome::Applied;
            }

            let now = Instant::now();
            inner.requested_text = text.clone();
            inner.requested_filters = filters.clone();
            let intent = inner.sequencer.begin(IntentKind::Search, text, filters, now);
            inner.replace_in_flight = Some(intent.id);
            inner.dispatch(PaginationEvent::SearchStarted);
            self.publish(&inner);

            tracing::debug!(
                intent_id = %intent.id,
                query = %intent.query_text,
                "Search intent issued"
            );
            (intent, inner.sort, inner.health.delay_before_next(now))
        };

        self.run_replace(intent, sort, delay).await
    }

    /// Show the next display batch.
    ///
    /// Served from the buffered provider page when it still has cards;
    /// otherwise fetches the next provider page for the current list.
    pub async fn load_more(&self) -> Outcome {
        let (intent, page, sort, delay) = {
            let mut inner = self.inner.lock();

            let state = &inner.pagination;
            if !state.has_more || state.is_busy() {
                return Outcome::Skipped;
            }

            let step = inner
                .buffer
                .as_ref()
                .map_or(CursorStep::Exhausted, |b| b.plan());

            match step {
                CursorStep::Consume => {
                    let appended = inner.consume_batch(self.display_batch_size);
                    inner.clamp_if_exhausted();
                    tracing::debug!(
                        appended,
                        loaded = inner.pagination.loaded_count,
                        total = inner.pagination.total_count,
                        "Load more served from buffered provider page"
                    );
                    self.publish(&inner);
                    return Outcome::Applied;
                }
                CursorStep::Exhausted => {
                    inner.clamp_if_exhausted();
                    self.publish(&inner);
                    return Outcome::Skipped;
                }
                CursorStep::Fetch { page } => {
                    let now = Instant::now();
                    let query = inner.pagination.last_query.clone();
                    let filters = inner.pagination.last_filters.clone();
                    let sort = inner.pagination.last_sort;
                    let intent = inner
                        .sequencer
                        .begin(IntentKind::LoadMore, query, filters, now);
                    inner.dispatch(PaginationEvent::LoadMoreStarted);
                    self.publish(&inner);
                    (intent, page, sort, inner.health.delay_before_next(now))
                }
            }
        };

        let Some((result, elapsed)) = self.fetch(&intent, page, sort, delay).await else {
            return Outcome::Superseded;
        };

        let mut inner = self.inner.lock();
        inner.observe(&intent, &result, elapsed);

        if !inner.sequencer.should_apply(&intent, Instant::now()) {
            tracing::debug!(intent_id = %intent.id, page, "Discarding superseded load-more result");
            return Outcome::Superseded;
        }

        let outcome = match result {
            Ok(provider_page) => {
                let mut buffer = ProviderPageBuffer::new(page, provider_page);
                if buffer.items.is_empty() {
                    tracing::warn!(page, "Provider returned an empty page");
                    buffer.provider_has_more = false;
                }
                inner.buffer = Some(buffer);
                let appended = inner.consume_batch(self.display_batch_size);
                inner.clamp_if_exhausted();
                tracing::info!(
                    intent_id = %intent.id,
                    page,
                    appended,
                    loaded = inner.pagination.loaded_count,
                    total = inner.pagination.total_count,
                    "Fetched next provider page"
                );
                Outcome::Applied
            }
            Err(err) => {
                let error = surface_failure(&intent, &err);
                inner.dispatch(PaginationEvent::LoadMoreFailed {
                    error: error.clone(),
                });
                Outcome::Failed(error)
            }
        };

        self.publish(&inner);
        outcome
    }

    /// Change the search-results sort.
    ///
    /// A fully loaded list is re-sorted in place; an incomplete one is
    /// re-queried from page 1 in the new order.
    pub async fn change_sort(&self, criterion: SortCriterion, direction: SortDirection) -> Outcome {
        let sort = SortState::new(criterion, direction);

        let (intent, delay) = {
            let mut inner = self.inner.lock();
            inner.sort = sort;

            // An in-flight search was issued with the old order.
            let decision = if inner.replace_in_flight.is_some() {
                SortDecision::Remote {
                    provider_sort: sort.provider_sort(),
                }
            } else {
                self.sort_policy
                    .decide(criterion, direction, &inner.pagination)
            };

            tracing::debug!(
                criterion = ?criterion,
                direction = direction.as_str(),
                mode = decision.mode(),
                total = inner.pagination.total_count,
                threshold = self.sort_policy.threshold(),
                "Sort decision"
            );

            match decision {
                SortDecision::Local => {
                    inner.dispatch(PaginationEvent::Resorted { sort });
                    self.publish(&inner);
                    return Outcome::Applied;
                }
                SortDecision::Remote { .. } => {
                    let now = Instant::now();
                    let text = inner.requested_text.clone();
                    let filters = inner.requested_filters.clone();
                    let intent = inner.sequencer.begin(IntentKind::Sort, text, filters, now);
                    inner.replace_in_flight = Some(intent.id);
                    inner.dispatch(PaginationEvent::SearchStarted);
                    self.publish(&inner);
                    (intent, inner.health.delay_before_next(now))
                }
            }
        };

        self.run_replace(intent, sort, delay).await
    }

    /// Fetch page 1 for a list-replacing intent and apply it if still wanted.
    async fn run_replace(&self, intent: SearchIntent, sort: SortState, delay: Duration) -> Outcome {
        let fetched = self.fetch(&intent, 1, sort, delay).await;

        let mut inner = self.inner.lock();
        inner.settle_replace(intent.id);

        let Some((result, elapsed)) = fetched else {
            return Outcome::Superseded;
        };
        inner.observe(&intent, &result, elapsed);

        let admission = inner.sequencer.admit(&intent, Instant::now());
        match (admission, &result) {
            (Admission::Stale, Err(err)) | (Admission::Grace, Err(err)) => {
                tracing::debug!(
                    intent_id = %intent.id,
                    error = %err,
                    "Swallowing failure of superseded intent"
                );
                return Outcome::Superseded;
            }
            (Admission::Stale, Ok(_)) => {
                tracing::debug!(
                    intent_id = %intent.id,
                    kind = intent.kind.as_str(),
                    current = ?inner.sequencer.current_id(),
                    "Discarding superseded result"
                );
                return Outcome::Superseded;
            }
            (Admission::Grace, Ok(_)) => {
                tracing::info!(
                    intent_id = %intent.id,
                    grace_ms = inner.sequencer.grace_window().as_millis() as u64,
                    "Applying superseded sort result inside grace window"
                );
            }
            (Admission::Current, _) => {}
        }

        let outcome = match result {
            Ok(page) => {
                let total_count = page.total_count;
                let mut buffer = ProviderPageBuffer::new(1, page);
                let items = buffer.take_batch(self.display_batch_size, &[]);
                tracing::info!(
                    intent_id = %intent.id,
                    kind = intent.kind.as_str(),
                    total = total_count,
                    shown = items.len(),
                    buffered = buffer.items.len(),
                    "Search results applied"
                );
                inner.buffer = Some(buffer);
                inner.dispatch(PaginationEvent::PageReplaced {
                    items,
                    total_count,
                    query: intent.query_text.clone(),
                    filters: intent.filters.clone(),
                    sort,
                });
                inner.clamp_if_exhausted();
                Outcome::Applied
            }
            Err(err) => {
                let error = surface_failure(&intent, &err);
                inner.buffer = None;
                inner.dispatch(PaginationEvent::SearchFailed {
                    error: error.clone(),
                });
                Outcome::Failed(error)
            }
        };

        // A newer search is still running behind the grace-applied result.
        if admission == Admission::Grace && inner.replace_in_flight.is_some() {
            inner.dispatch(PaginationEvent::SearchStarted);
        }

        self.publish(&inner);
        outcome
    }

    /// Network half of an intent: pace, re-check staleness, call the provider.
    ///
    /// Returns `None` when the intent was superseded before the request went out.
    async fn fetch(
        &self,
        intent: &SearchIntent,
        page: u32,
        sort: SortState,
        delay: Duration,
    ) -> Option<FetchResult> {
        if !delay.is_zero() {
            tracing::debug!(
                intent_id = %intent.id,
                delay_ms = delay.as_millis() as u64,
                "Pacing request for degraded provider"
            );
            tokio::time::sleep(delay).await;
        }

        {
            let mut inner = self.inner.lock();
            if !inner.sequencer.is_current(intent) {
                tracing::debug!(
                    intent_id = %intent.id,
                    kind = intent.kind.as_str(),
                    "Intent superseded before request, abandoning"
                );
                return None;
            }
            inner.health.mark_request_issued(Instant::now());
        }

        let request = ProviderRequest {
            query: self.builder.build(&intent.query_text, &intent.filters),
            page,
            sort: sort.provider_sort(),
        };

        tracing::debug!(
            intent_id = %intent.id,
            kind = intent.kind.as_str(),
            provider = self.provider.name(),
            query = %request.query,
            page,
            order = request.sort.field,
            dir = request.sort.direction.as_str(),
            "Issuing search request"
        );

        let started = Instant::now();
        let result = self.provider.search(&request).await;
        Some((result, started.elapsed()))
    }

    fn publish(&self, inner: &EngineInner) {
        self.view_tx.send_replace(inner.view());
    }
}

impl SearchEngine<HttpProvider> {
    /// Engine talking to the HTTP provider described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self::new(HttpProvider::new(&config.provider)?, config))
    }
}

fn surface_failure(intent: &SearchIntent, err: &ProviderError) -> SearchError {
    if err.is_rejection() {
        tracing::error!(
            intent_id = %intent.id,
            kind = intent.kind.as_str(),
            error = %err,
            "Provider rejected a request the engine should never have issued"
        );
    } else {
        tracing::warn!(
            intent_id = %intent.id,
            kind = intent.kind.as_str(),
            error_type = err.error_type(),
            error = %err,
            "Search request failed"
        );
    }
    SearchError::from(err)
}

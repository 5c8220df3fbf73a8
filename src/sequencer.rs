//! Request sequencing: which in-flight result is still wanted.
//!
//! Every search intent gets the next id and becomes current before any I/O,
//! so anything the user does afterwards supersedes it. The single deliberate
//! exception is the sort grace window: the most recent remote re-sort may
//! still land for a bounded time after it was superseded.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use crate::query::SearchFilters;

/// Totally ordered intent identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntentId(u64);

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    /// Typed text or filter change.
    Search,
    /// Next provider page for the current list.
    LoadMore,
    /// Remote re-sort of the current query.
    Sort,
}

impl IntentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IntentKind::Search => "search",
            IntentKind::LoadMore => "load_more",
            IntentKind::Sort => "sort",
        }
    }
}

/// One user-triggered attempt to obtain a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchIntent {
    pub id: IntentId,
    pub kind: IntentKind,
    pub query_text: String,
    pub filters: SearchFilters,
    pub created_at: Instant,
    /// Remote re-sorts may outlive supersession inside the grace window.
    pub sort_authoritative: bool,
}

/// Why a result is allowed to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The intent is still current.
    Current,
    /// Superseded, but admitted under the sort grace window.
    Grace,
    /// Superseded; drop the result.
    Stale,
}

impl Admission {
    pub fn is_admitted(self) -> bool {
        !matches!(self, Admission::Stale)
    }
}

/// Owned sequencing state of one engine.
#[derive(Debug)]
pub struct SequencerState {
    last_issued: u64,
    current: Option<IntentId>,
    last_sort: Option<(IntentId, Instant)>,
    grace_window: Duration,
}

impl SequencerState {
    pub fn new(grace_window: Duration) -> Self {
        Self {
            last_issued: 0,
            current: None,
            last_sort: None,
            grace_window,
        }
    }

    pub fn current_id(&self) -> Option<IntentId> {
        self.current
    }

    pub fn grace_window(&self) -> Duration {
        self.grace_window
    }

    /// Create the next intent and make it current.
    pub fn begin(
        &mut self,
        kind: IntentKind,
        query_text: impl Into<String>,
        filters: SearchFilters,
        now: Instant,
    ) -> SearchIntent {
        self.last_issued += 1;
        let id = IntentId(self.last_issued);
        self.current = Some(id);

        let sort_authoritative = kind == IntentKind::Sort;
        if sort_authoritative {
            self.last_sort = Some((id, now));
        }

        SearchIntent {
            id,
            kind,
            query_text: query_text.into(),
            filters,
            created_at: now,
            sort_authoritative,
        }
    }

    /// Supersede whatever is in flight without issuing a new request.
    ///
    /// Also ends any sort grace: a cleared list must not be refilled by a
    /// re-sort of the query it replaced.
    pub fn invalidate(&mut self) {
        self.last_issued += 1;
        self.current = Some(IntentId(self.last_issued));
        self.last_sort = None;
    }

    pub fn is_current(&self, intent: &SearchIntent) -> bool {
        self.current == Some(intent.id)
    }

    /// Decide whether a resolved intent's result may be applied at `now`.
    pub fn admit(&self, intent: &SearchIntent, now: Instant) -> Admission {
        if self.is_current(intent) {
            return Admission::Current;
        }

        if self.within_grace(intent, now) {
            Admission::Grace
        } else {
            Admission::Stale
        }
    }

    /// Shorthand for `admit(..).is_admitted()`.
    pub fn should_apply(&self, intent: &SearchIntent, now: Instant) -> bool {
        self.admit(intent, now).is_admitted()
    }

    fn within_grace(&self, intent: &SearchIntent, now: Instant) -> bool {
        if !intent.sort_authoritative {
            return false;
        }
        match self.last_sort {
            Some((id, at)) => id == intent.id && now.duration_since(at) <= self.grace_window,
            None => false,
        }
    }
}

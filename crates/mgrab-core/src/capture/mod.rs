//! Capture coordinator: routes network observation events into the registry.
//!
//! The coordinator is process-wide singleton state, driven from a single
//! logical task. It starts in `Restoring` and buffers events behind a cheap
//! extension pre-check until `restore()` has loaded the persisted session
//! and resource list; the buffer is then replayed once, in arrival order,
//! and discarded. After that every event runs the full path synchronously:
//! context match -> scheme rejection -> dedup -> classify -> admission ->
//! insert -> persist.
//!
//! Two independent observation channels (response-headers-available and
//! full-completion) feed the same path; the registry's dedup-by-URL is the
//! sole mechanism reconciling them, so whichever event arrives first for a
//! URL wins, including its size field.

mod event;
mod session;


pub use event::{EventSource, ObservationEvent, RawEvent, RawHeader};
pub use session::MonitoringSession;

use chrono::Utc;
use serde::Serialize;

use crate::classify::{self, has_media_extension};
use crate::filter::FilterConfig;
use crate::registry::{CapturedResource, ResourceRegistry};
use crate::state_db::{PersistedState, StateDb};

/// Cap on events buffered while restoring. Overflow is dropped with a warning.
const PENDING_CAP: usize = 4096;

/// Outcome of feeding one event to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    /// Held in the pending queue until restoration completes.
    Buffered,
    /// Passed the full path and was inserted into the registry.
    Accepted,
    /// Rejected somewhere along the path (or dropped on queue overflow).
    Rejected,
}

/// Status snapshot returned by the command surface.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub active: bool,
    pub context: Option<i64>,
    pub filters: FilterConfig,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoordinatorState {
    Restoring,
    Ready,
}

pub struct CaptureCoordinator {
    state: CoordinatorState,
    session: MonitoringSession,
    registry: ResourceRegistry,
    pending: Vec<ObservationEvent>,
    db: StateDb,
}

impl CaptureCoordinator {
    /// Starts in `Restoring`; no event applies side effects until `restore`.
    pub fn new(db: StateDb) -> Self {
        Self {
            state: CoordinatorState::Restoring,
            session: MonitoringSession::default(),
            registry: ResourceRegistry::new(),
            pending: Vec::new(),
            db,
        }
    }

    /// Loads persisted session + resources, then transitions to `Ready` and
    /// replays the pending queue in arrival order. One-shot and idempotent;
    /// a load failure still transitions to `Ready` with defaults so buffered
    /// events are not lost forever.
    pub async fn restore(&mut self) {
        if self.state == CoordinatorState::Ready {
            return;
        }
        match self.db.load_state().await {
            Ok(state) => {
                self.session = MonitoringSession {
                    active: state.active,
                    context: state.context,
                    filters: state.filters,
                };
                self.registry.replace_all(state.resources);
                tracing::debug!(
                    active = self.session.active,
                    restored = self.registry.len(),
                    "state restored"
                );
            }
            Err(err) => {
                tracing::warn!("state restore failed, starting empty: {:#}", err);
            }
        }
        self.state = CoordinatorState::Ready;

        let queued = std::mem::take(&mut self.pending);
        if !queued.is_empty() {
            tracing::debug!(count = queued.len(), "replaying buffered events");
            for event in queued {
                self.process_event(event).await;
            }
        }
    }

    /// Feed one observation event from either capture channel.
    pub async fn observe(&mut self, event: ObservationEvent) -> Observed {
        match self.state {
            CoordinatorState::Restoring => {
                if !has_media_extension(&event.url) {
                    return Observed::Rejected;
                }
                if self.pending.len() >= PENDING_CAP {
                    tracing::warn!("pending queue full, dropping {}", event.url);
                    return Observed::Rejected;
                }
                self.pending.push(event);
                Observed::Buffered
            }
            CoordinatorState::Ready => self.process_event(event).await,
        }
    }

    async fn process_event(&mut self, event: ObservationEvent) -> Observed {
        if !self.session.active {
            return Observed::Rejected;
        }
        if !self.session.matches_context(event.context_id) {
            return Observed::Rejected;
        }
        if classify::is_undownloadable_scheme(&event.url) {
            return Observed::Rejected;
        }
        if self.registry.contains(&event.url) {
            return Observed::Rejected;
        }

        let classification = classify::classify(&event.url, event.content_type.as_deref());
        if !self.session.filters.admits(&classification) {
            return Observed::Rejected;
        }

        let resource = CapturedResource {
            url: event.url,
            category: classification.category,
            format: classification.format.to_string(),
            size: event.content_length.unwrap_or(0),
            timestamp: Utc::now().timestamp_millis(),
            status_code: event.status_code,
            method: event.method,
            content_type: event.content_type.unwrap_or_default(),
        };
        tracing::debug!(
            category = classification.category.as_str(),
            format = classification.format,
            url = %resource.url,
            "captured resource"
        );
        self.registry.insert_if_absent(resource);
        self.persist().await;
        Observed::Accepted
    }

    /// Start a session scoped to a browsing context. Clears the registry,
    /// optionally replaces filters, and persists immediately. Idempotent.
    pub async fn start(&mut self, context: Option<i64>, filters: Option<FilterConfig>) {
        self.session.active = true;
        self.session.context = context;
        if let Some(filters) = filters {
            self.session.filters = filters;
        }
        self.registry.clear();
        self.persist().await;
        tracing::info!(context = ?context, "monitoring started");
    }

    /// Stop observation acceptance. Captured data is kept. Idempotent.
    pub async fn stop(&mut self) {
        self.session.active = false;
        self.session.context = None;
        self.persist().await;
        tracing::info!("monitoring stopped");
    }

    /// Replace the filter config mid-session. Existing entries are untouched;
    /// only future observations see the new policy.
    pub async fn update_filters(&mut self, filters: FilterConfig) {
        self.session.filters = filters;
        self.persist().await;
    }

    /// Drop all captured resources (session state is untouched).
    pub async fn clear(&mut self) {
        self.registry.clear();
        self.persist().await;
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            active: self.session.active,
            context: self.session.context,
            filters: self.session.filters.clone(),
            count: self.registry.len(),
        }
    }

    /// Snapshot of captured resources in insertion order.
    pub fn resources(&self) -> Vec<CapturedResource> {
        self.registry.snapshot()
    }

    /// Mirror the current state. Failure is logged, never rolled back; the
    /// in-memory state stays authoritative for this process lifetime.
    async fn persist(&self) {
        let state = PersistedState {
            active: self.session.active,
            context: self.session.context,
            filters: self.session.filters.clone(),
            resources: self.registry.snapshot(),
        };
        if let Err(err) = self.db.save_state(&state).await {
            tracing::warn!("state persist failed: {:#}", err);
        }
    }
}

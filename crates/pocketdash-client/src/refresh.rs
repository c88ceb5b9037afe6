//! Latest-snapshot holder with a single-flight refresh guard.
//!
//! At most one load runs at a time per [`Dashboard`]. A trigger that arrives
//! while another is outstanding is dropped, never queued, and every completed
//! cycle replaces the stored snapshot wholesale.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::contracts::types::DashboardModel;
use crate::pipeline::render_dashboard;
use crate::source::fetch::CsvSource;
use crate::{ClientError, RENDER_FAILURE_PLACEHOLDER};

#[derive(Debug, Clone)]
pub enum Snapshot {
    Ready(Box<DashboardModel>),
    Failed(ClientError),
}

impl Snapshot {
    /// Text the view shows in place of the dashboard, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(_) => Some(RENDER_FAILURE_PLACEHOLDER),
        }
    }
}

/// Result of one trigger. A completed refresh carries the snapshot it stored.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    Completed(Snapshot),
    Skipped,
}

impl RefreshOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed(_) => "completed",
            Self::Skipped => "skipped",
        }
    }

    pub fn into_snapshot(self) -> Option<Snapshot> {
        match self {
            Self::Completed(snapshot) => Some(snapshot),
            Self::Skipped => None,
        }
    }
}

pub struct Dashboard<S> {
    source: S,
    config: DashboardConfig,
    in_flight: AtomicBool,
    latest: Mutex<Option<Snapshot>>,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Claim on the single refresh slot; the slot frees when the ticket drops.
pub struct RefreshTicket<'a, S> {
    dashboard: &'a Dashboard<S>,
    _guard: InFlightGuard<'a>,
}

impl<S> RefreshTicket<'_, S>
where
    S: CsvSource,
{
    /// Loads and renders, stores the result, and hands back what was stored.
    pub fn run(self, now: NaiveDateTime) -> Snapshot {
        let dashboard = self.dashboard;
        let snapshot = match render_dashboard(&dashboard.source, &dashboard.config, now) {
            Ok(model) => Snapshot::Ready(Box::new(model)),
            Err(error) => {
                info!(code = %error.code, "refresh failed; showing placeholder");
                Snapshot::Failed(error)
            }
        };
        dashboard.store(snapshot.clone());
        snapshot
    }
}

impl<S> Dashboard<S>
where
    S: CsvSource,
{
    pub fn new(source: S, config: DashboardConfig) -> Self {
        Self {
            source,
            config,
            in_flight: AtomicBool::new(false),
            latest: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Takes the refresh slot, or drops the trigger if a load is running.
    pub fn try_begin(&self) -> Option<RefreshTicket<'_, S>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(
                source = %self.source.describe(),
                "refresh already in flight; dropping trigger"
            );
            return None;
        }
        Some(RefreshTicket {
            dashboard: self,
            _guard: InFlightGuard(&self.in_flight),
        })
    }

    /// Runs one render cycle unless another is already running.
    pub fn refresh(&self, now: NaiveDateTime) -> RefreshOutcome {
        match self.try_begin() {
            Some(ticket) => RefreshOutcome::Completed(ticket.run(now)),
            None => RefreshOutcome::Skipped,
        }
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        match self.latest.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn store(&self, snapshot: Snapshot) {
        match self.latest.lock() {
            Ok(mut slot) => *slot = Some(snapshot),
            Err(poisoned) => *poisoned.into_inner() = Some(snapshot),
        }
    }
}

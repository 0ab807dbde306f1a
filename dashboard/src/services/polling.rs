//! Polling controller
//!
//! Keeps the evaluation store fresh: one-shot refreshes on demand, plus a
//! repeating timer that stays quiet while a deep analysis is in flight.

use shared::{Component, component_debug, component_info, component_warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::RefreshOrdering;
use crate::state::SharedState;
use crate::traits::EvaluationApi;

/// Result of one full refresh
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Store replaced with this many records
    Applied { count: usize },
    /// Fetch failed; the message is now in the error banner
    Failed(String),
    /// An older response arrived after a newer one was applied
    Discarded,
    /// Auto-refresh tick skipped because an analysis is in flight
    Suppressed,
    /// Dashboard already torn down
    Inactive,
}

/// Keeps `loading` true for as long as a refresh is outstanding
///
/// Dropping the guard (completion, error, or a cancelled future) releases it.
struct LoadingGuard {
    state: SharedState,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.with(|s| s.poll.in_flight = s.poll.in_flight.saturating_sub(1));
    }
}

/// A refresh that has been admitted and marked as loading
struct RefreshTicket {
    seq: u64,
    _loading: LoadingGuard,
}

pub struct PollingController<A: EvaluationApi> {
    api: Arc<A>,
    state: SharedState,
    ordering: RefreshOrdering,
}

impl<A: EvaluationApi> Clone for PollingController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: self.state.clone(),
            ordering: self.ordering,
        }
    }
}

impl<A: EvaluationApi + 'static> PollingController<A> {
    pub fn new(api: Arc<A>, state: SharedState, ordering: RefreshOrdering) -> Self {
        Self { api, state, ordering }
    }

    /// Fetch the full list now, regardless of suppression
    pub async fn refresh_now(&self) -> RefreshOutcome {
        match self.admit(false) {
            Ok(ticket) => self.run(ticket).await,
            Err(outcome) => outcome,
        }
    }

    /// Run `refresh_now` every `interval`, skipping ticks while suppressed
    ///
    /// The first tick fires one full interval after the call. Ticks do not
    /// wait for earlier fetches, so refreshes may overlap.
    pub fn start_auto_refresh(&self, interval: Duration) -> AutoRefreshHandle {
        let controller = self.clone();
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => {
                        match controller.admit(true) {
                            Ok(ticket) => {
                                let worker = controller.clone();
                                tokio::spawn(async move {
                                    worker.run(ticket).await;
                                });
                            }
                            Err(RefreshOutcome::Inactive) => break,
                            Err(_) => {
                                component_debug!(Component::Poller, "Skipping auto-refresh while analysis is in flight");
                            }
                        }
                    }
                }
            }

            component_debug!(Component::Poller, "Auto-refresh timer stopped");
        });

        component_info!(
            Component::Poller,
            interval_secs = interval.as_secs_f64(),
            "⏱️ Auto-refresh started"
        );

        AutoRefreshHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Check-and-set in one locked section: admission, `loading`, error reset, sequence
    fn admit(&self, respect_suppression: bool) -> Result<RefreshTicket, RefreshOutcome> {
        let seq = self.state.with(|s| {
            if !s.active {
                return Err(RefreshOutcome::Inactive);
            }
            if respect_suppression && s.suppressed() {
                return Err(RefreshOutcome::Suppressed);
            }
            s.poll.in_flight += 1;
            s.error = None;
            let seq = s.poll.next_seq;
            s.poll.next_seq += 1;
            Ok(seq)
        })?;

        Ok(RefreshTicket {
            seq,
            _loading: LoadingGuard {
                state: self.state.clone(),
            },
        })
    }

    async fn run(&self, ticket: RefreshTicket) -> RefreshOutcome {
        let result = self.api.fetch_evaluations().await;
        let ordering = self.ordering;
        let seq = ticket.seq;

        let outcome = self.state.with(|s| {
            if !s.active {
                return RefreshOutcome::Inactive;
            }
            if ordering == RefreshOrdering::LatestIssuedWins && s.poll.applied_seq.is_some_and(|applied| seq < applied) {
                return RefreshOutcome::Discarded;
            }
            match result {
                Ok(contracts) => {
                    let count = s.store.replace_all(contracts);
                    s.poll.applied_seq = Some(seq);
                    RefreshOutcome::Applied { count }
                }
                Err(e) => {
                    let message = e.to_string();
                    s.error = Some(message.clone());
                    RefreshOutcome::Failed(message)
                }
            }
        });
        drop(ticket);

        match &outcome {
            RefreshOutcome::Applied { count } => {
                component_info!(Component::Poller, seq, "🔄 Refreshed {} evaluations", count);
            }
            RefreshOutcome::Failed(message) => {
                component_warn!(Component::Poller, seq, "Refresh failed: {}", message);
            }
            RefreshOutcome::Discarded => {
                component_debug!(Component::Poller, seq, "Discarded out-of-order refresh response");
            }
            RefreshOutcome::Inactive => {
                component_debug!(Component::Poller, seq, "Ignoring refresh response after teardown");
            }
            RefreshOutcome::Suppressed => {}
        }

        outcome
    }
}

/// Running auto-refresh timer; dropping it cancels future ticks
pub struct AutoRefreshHandle {
    shutdown: Option<mpsc::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl AutoRefreshHandle {
    /// Stop the timer and wait for it to exit
    ///
    /// Fetches already started keep running; their results are applied or
    /// ignored by the normal refresh path.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(()).await;
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for AutoRefreshHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

//! Polling controller: recurring price lookups for one session at a time.
//!
//! Every reconfiguration bumps the session [`Generation`]; each fetch is
//! stamped with the generation it was issued under and reports back over a
//! channel. The owner hands each [`PollEvent`] to [`PollingController::accept`]
//! (or [`apply`](PollingController::apply)), which drops results from any
//! generation but the current one. In-flight fetches are never aborted; a
//! result that lands after a reconfiguration is simply discarded.

pub mod session;

pub use session::{Frequency, Generation, Session};

use crate::domain::price::{HistoryBuffer, Observation};
use crate::error::PollError;
use crate::gateway::Gateway;
use crate::shared::AlphaId;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Outcome of one fetch, as reported by its task.
#[derive(Debug, Clone)]
pub struct PollEvent {
    pub generation: Generation,
    pub target: AlphaId,
    pub result: Result<Observation, PollError>,
}

/// A current-generation result, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum PollUpdate {
    /// A fresh observation; any displayed error should be cleared.
    Observation(Observation),
    /// The lookup failed; the timer keeps running and the next tick retries.
    Failed(String),
}

/// Owns the repeating timer for the active session.
///
/// At most one timer task exists at any time. Dropping the controller cancels it.
pub struct PollingController {
    gateway: Arc<dyn Gateway>,
    session: Session,
    generation: Generation,
    timer: Option<JoinHandle<()>>,
    in_flight: Arc<AtomicUsize>,
    event_tx: mpsc::UnboundedSender<PollEvent>,
    event_rx: mpsc::UnboundedReceiver<PollEvent>,
}

impl PollingController {
    /// Create an idle controller. Must be used inside a tokio runtime once
    /// a session is enabled.
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            session: Session::default(),
            generation: Generation::default(),
            timer: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            event_tx,
            event_rx,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether a repeating timer is currently installed.
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Fetches issued and not yet completed, across all generations.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Reconfigure the session. See [`configure`](Self::configure).
    pub fn set_session(
        &mut self,
        target: impl Into<AlphaId>,
        frequency: Frequency,
        enabled: bool,
    ) -> bool {
        self.configure(Session::new(target, frequency, enabled))
    }

    /// Install `session`, tearing down the previous timer.
    ///
    /// An identical session is a no-op and returns `false`. Otherwise the
    /// generation advances, so results from earlier sessions are discarded,
    /// and a live session fetches once immediately and then every period.
    pub fn configure(&mut self, session: Session) -> bool {
        if session == self.session {
            return false;
        }

        self.stop_timer();
        self.generation = self.generation.next();
        self.session = session;

        tracing::debug!(
            target_id = %self.session.target,
            frequency = %self.session.frequency,
            enabled = self.session.enabled,
            generation = %self.generation,
            "Polling session reconfigured"
        );

        if self.session.is_live() {
            self.start_timer();
        }
        true
    }

    /// Issue one fetch for the current target under the current generation.
    ///
    /// Returns `false` when there is no target.
    pub fn fetch_now(&mut self) -> bool {
        if self.session.target.is_empty() {
            return false;
        }
        self.spawn_fetch();
        true
    }

    /// Tear down and reinstall the current session under a new generation.
    ///
    /// Results of fetches issued before the restart are discarded; a live
    /// session fetches immediately again.
    pub fn restart(&mut self) {
        self.stop_timer();
        self.generation = self.generation.next();
        tracing::debug!(
            target_id = %self.session.target,
            generation = %self.generation,
            "Polling session restarted"
        );
        if self.session.is_live() {
            self.start_timer();
        }
    }

    /// Cancel polling unconditionally and invalidate outstanding fetches,
    /// whether or not the session was live.
    pub fn shutdown(&mut self) {
        self.session.enabled = false;
        self.restart();
    }

    /// Check an event against the current generation.
    ///
    /// Returns `Err(PollError::StaleResult)` for results from any other
    /// generation; those must not be shown or stored.
    pub fn accept(&self, event: PollEvent) -> Result<PollUpdate, PollError> {
        if event.generation != self.generation {
            tracing::debug!(
                target_id = %event.target,
                generation = %event.generation,
                current = %self.generation,
                "Discarding stale poll result"
            );
            return Err(PollError::StaleResult {
                generation: event.generation.value(),
                current: self.generation.value(),
            });
        }
        match event.result {
            Ok(observation) => Ok(PollUpdate::Observation(observation)),
            Err(PollError::FetchFailed(msg)) => Ok(PollUpdate::Failed(msg)),
            Err(other) => Err(other),
        }
    }

    /// [`accept`](Self::accept), pushing a fresh observation into `history`.
    pub fn apply(
        &self,
        event: PollEvent,
        history: &mut HistoryBuffer,
    ) -> Result<PollUpdate, PollError> {
        let update = self.accept(event)?;
        if let PollUpdate::Observation(observation) = &update {
            history.push(observation.clone());
        }
        Ok(update)
    }

    /// Wait for the next fetch to complete, whatever its generation.
    pub async fn next_event(&mut self) -> Option<PollEvent> {
        self.event_rx.recv().await
    }

    /// The next completed fetch, if one is already waiting.
    pub fn try_next_event(&mut self) -> Option<PollEvent> {
        self.event_rx.try_recv().ok()
    }

    // ── Timer ────────────────────────────────────────────────────────────

    fn start_timer(&mut self) {
        self.spawn_fetch();

        let period = self.session.frequency.period();
        let fetcher = self.fetcher();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                fetcher.spawn();
            }
        });
        tracing::info!(
            target_id = %self.session.target,
            frequency = %self.session.frequency,
            "Polling started"
        );
        self.timer = Some(handle);
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
            tracing::info!(target_id = %self.session.target, "Polling stopped");
        }
    }

    fn spawn_fetch(&self) {
        self.fetcher().spawn();
    }

    fn fetcher(&self) -> Fetcher {
        Fetcher {
            gateway: Arc::clone(&self.gateway),
            target: self.session.target.clone(),
            generation: self.generation,
            in_flight: Arc::clone(&self.in_flight),
            event_tx: self.event_tx.clone(),
        }
    }
}

impl Drop for PollingController {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

/// Everything one fetch task needs, stamped with its generation.
#[derive(Clone)]
struct Fetcher {
    gateway: Arc<dyn Gateway>,
    target: AlphaId,
    generation: Generation,
    in_flight: Arc<AtomicUsize>,
    event_tx: mpsc::UnboundedSender<PollEvent>,
}

impl Fetcher {
    /// Fire and forget: overlapping fetches are allowed.
    fn spawn(&self) {
        let this = self.clone();
        this.in_flight.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async move {
            let result = this
                .gateway
                .get_price(&this.target)
                .await
                .map_err(PollError::from);
            this.in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Err(e) = &result {
                tracing::warn!(target_id = %this.target, error = %e, "Price fetch failed");
            }
            // The receiver is gone once the controller is dropped.
            let _ = this.event_tx.send(PollEvent {
                generation: this.generation,
                target: this.target,
                result,
            });
        });
    }
}

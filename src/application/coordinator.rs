//! Session & timing coordinator.
//!
//! Owns the session state and drives it from feed events:
//!
//! ```text
//! AwaitingSession --[userState]--> AwaitingCatalog --[listUpdate]--> Dispatching --> Done
//! ```
//!
//! Unknown event types and malformed frames are logged and dropped; they are
//! never fatal. The catalog event triggers exactly one dispatch batch; later
//! catalog events arriving while that batch is in flight are ignored.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::{
    CatalogSnapshot, RegistrationOutcome, RetryPolicy, SessionPhase, SessionState,
};
use crate::ports::{EventFeed, FeedError, RegistrationGateway, StatusReporter};

use super::dispatcher::dispatch;
use super::events::{parse_event, InboundEvent};

/// Drives one registration session from feed connect to batch completion.
pub struct Coordinator {
    state: SessionState,
    gateway: Arc<dyn RegistrationGateway>,
    reporter: Arc<dyn StatusReporter>,
    policy: RetryPolicy,
    /// Fixed start-of-window delay compensating client/server clock skew.
    offset: Duration,
    /// When set, hold the batch until the registration instant, ticking a
    /// one-second countdown. Otherwise the catalog event dispatches at once.
    on_time: bool,
}

impl Coordinator {
    pub fn new(
        state: SessionState,
        gateway: Arc<dyn RegistrationGateway>,
        reporter: Arc<dyn StatusReporter>,
        policy: RetryPolicy,
        offset: Duration,
        on_time: bool,
    ) -> Self {
        Self {
            state,
            gateway,
            reporter,
            policy,
            offset,
            on_time,
        }
    }

    /// Consumes feed events until the dispatch batch completes, returning the
    /// per-course outcomes.
    ///
    /// Feed failures before a batch has started are fatal. Once a batch is in
    /// flight, a failing or closing feed only stops event intake; the batch
    /// still runs to completion.
    pub async fn run<F: EventFeed>(mut self, mut feed: F) -> Result<Vec<RegistrationOutcome>, FeedError> {
        let (done_tx, mut done_rx) = mpsc::channel::<Vec<RegistrationOutcome>>(1);

        loop {
            tokio::select! {
                outcomes = done_rx.recv() => {
                    // The coordinator holds a sender until a batch is
                    // spawned, so recv only resolves with real outcomes.
                    let outcomes = outcomes.unwrap_or_default();
                    self.state.finish();
                    return Ok(outcomes);
                }
                frame = feed.next_frame() => {
                    match frame {
                        Ok(Some(frame)) => self.handle_frame(&frame, &done_tx),
                        Ok(None) | Err(_) if self.state.phase() == SessionPhase::Dispatching => {
                            if let Err(err) = &frame {
                                warn!(error = %err, "feed lost while batch in flight, awaiting outcomes");
                            }
                            let outcomes = done_rx.recv().await.unwrap_or_default();
                            self.state.finish();
                            return Ok(outcomes);
                        }
                        Ok(None) => {
                            return Err(FeedError::Read(
                                "feed closed before registration was triggered".to_string(),
                            ));
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }
    }

    fn handle_frame(&mut self, frame: &str, done_tx: &mpsc::Sender<Vec<RegistrationOutcome>>) {
        let event = match parse_event(frame) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "dropping malformed feed frame");
                return;
            }
        };

        match event {
            InboundEvent::SessionInfo {
                favorites,
                registration_time_ms,
            } => {
                self.state.apply_session_info(favorites, registration_time_ms);
                self.reporter.favorites_known(self.state.favorites());
                info!(
                    favorites = self.state.favorites().len(),
                    instant = ?self.state.registration_instant(),
                    "session info recorded"
                );
            }
            InboundEvent::CatalogUpdate { entries } => {
                if matches!(
                    self.state.phase(),
                    SessionPhase::Dispatching | SessionPhase::Done
                ) {
                    info!("catalog update while batch in flight, ignoring");
                    return;
                }
                self.state.apply_catalog(CatalogSnapshot::from_entries(&entries));
                info!(courses = entries.len(), "catalog snapshot replaced");

                if self.state.favorites().is_empty() {
                    warn!("catalog update with no favorites known, not dispatching");
                    return;
                }
                self.trigger_dispatch(done_tx.clone());
            }
            InboundEvent::Unknown { kind } => {
                debug!(kind = %kind, "ignoring unknown event type");
            }
        }
    }

    /// Snapshots the session and spawns the batch. The coordinator keeps
    /// reading the feed while the countdown and workers run.
    fn trigger_dispatch(&mut self, done_tx: mpsc::Sender<Vec<RegistrationOutcome>>) {
        let snapshot = self.state.begin_dispatch();
        let instant = self.state.registration_instant();
        let gateway = Arc::clone(&self.gateway);
        let reporter = Arc::clone(&self.reporter);
        let policy = self.policy;
        let offset = self.offset;
        let on_time = self.on_time;

        tokio::spawn(async move {
            if on_time {
                run_countdown(reporter.as_ref(), instant).await;
            } else if let Some(remaining) = remaining_until(instant) {
                // One informational tick even when not waiting for the window.
                reporter.countdown_tick(remaining);
            }

            let outcomes = dispatch(gateway, reporter, snapshot, policy, offset).await;
            let _ = done_tx.send(outcomes).await;
        });
    }
}

/// Ticks the reporter once a second until the registration instant passes.
/// An unknown instant means there is nothing to wait for.
async fn run_countdown(reporter: &dyn StatusReporter, instant: Option<DateTime<Utc>>) {
    loop {
        let Some(remaining) = remaining_until(instant) else {
            return;
        };
        reporter.countdown_tick(remaining);
        sleep(remaining.min(Duration::from_secs(1))).await;
    }
}

fn remaining_until(instant: Option<DateTime<Utc>>) -> Option<Duration> {
    let remaining = (instant? - Utc::now()).to_std().ok()?;
    if remaining.is_zero() {
        return None;
    }
    Some(remaining)
}

//! Session state - everything learned from the feed, owned by the coordinator.

use chrono::{DateTime, TimeZone, Utc};

use super::action::RegistrationAction;
use super::catalog::CatalogSnapshot;

/// Lifecycle phase of one registration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Waiting for the first `userState` event.
    #[default]
    AwaitingSession,
    /// Session info recorded, waiting for a catalog update.
    AwaitingCatalog,
    /// A dispatch batch has been triggered.
    Dispatching,
    /// The batch completed; the process is expected to terminate.
    Done,
}

/// Mutable session state. Only the coordinator touches this; the dispatcher
/// and workers see an immutable [`DispatchSnapshot`] taken at trigger time.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    phase: SessionPhase,
    favorites: Vec<String>,
    favorites_from_config: bool,
    registration_instant: Option<DateTime<Utc>>,
    catalog: CatalogSnapshot,
    action: RegistrationAction,
}

impl SessionState {
    /// Starts a session. A non-empty configured favorites list takes
    /// precedence over whatever the feed later reports.
    pub fn new(configured_favorites: Vec<String>, action: RegistrationAction) -> Self {
        Self {
            phase: SessionPhase::AwaitingSession,
            favorites_from_config: !configured_favorites.is_empty(),
            favorites: configured_favorites,
            registration_instant: None,
            catalog: CatalogSnapshot::default(),
            action,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn registration_instant(&self) -> Option<DateTime<Utc>> {
        self.registration_instant
    }

    /// Applies a `userState` event: records the registration instant (when
    /// reported) and, unless favorites came from configuration, the reported
    /// favorites.
    pub fn apply_session_info(&mut self, favorites: Vec<String>, registration_time_ms: Option<f64>) {
        if !self.favorites_from_config && self.favorites.is_empty() {
            self.favorites = favorites;
        }
        if let Some(ms) = registration_time_ms {
            self.registration_instant = Utc.timestamp_millis_opt(ms as i64).single();
        }
        if self.phase == SessionPhase::AwaitingSession {
            self.phase = SessionPhase::AwaitingCatalog;
        }
    }

    /// Applies a `listUpdate` event: the snapshot is replaced wholesale,
    /// never merged.
    pub fn apply_catalog(&mut self, catalog: CatalogSnapshot) {
        self.catalog = catalog;
    }

    /// Marks the session as dispatching and returns the immutable inputs for
    /// the batch. Later feed events no longer affect the in-flight batch.
    pub fn begin_dispatch(&mut self) -> DispatchSnapshot {
        self.phase = SessionPhase::Dispatching;
        DispatchSnapshot {
            favorites: self.favorites.clone(),
            action: self.action,
            catalog: self.catalog.clone(),
        }
    }

    pub fn finish(&mut self) {
        self.phase = SessionPhase::Done;
    }
}

/// Frozen view of the session handed to one dispatch batch.
#[derive(Debug, Clone)]
pub struct DispatchSnapshot {
    pub favorites: Vec<String>,
    pub action: RegistrationAction,
    pub catalog: CatalogSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn configured_favorites_take_precedence_over_feed() {
        let mut state = SessionState::new(vec!["CS500".into()], RegistrationAction::Add);
        state.apply_session_info(vec!["CS101".into()], None);
        assert_eq!(state.favorites(), ["CS500".to_string()]);
    }

    #[test]
    fn feed_favorites_fill_an_empty_config() {
        let mut state = SessionState::new(vec![], RegistrationAction::Add);
        state.apply_session_info(vec!["CS101".into(), "CS102".into()], None);
        assert_eq!(state.favorites().len(), 2);
    }

    #[test]
    fn session_info_advances_phase_once() {
        let mut state = SessionState::new(vec![], RegistrationAction::Add);
        assert_eq!(state.phase(), SessionPhase::AwaitingSession);
        state.apply_session_info(vec![], Some(1_700_000_000_000.0));
        assert_eq!(state.phase(), SessionPhase::AwaitingCatalog);
        state.apply_session_info(vec![], Some(1_700_000_001_000.0));
        assert_eq!(state.phase(), SessionPhase::AwaitingCatalog);
    }

    #[test]
    fn registration_instant_is_epoch_millis() {
        let mut state = SessionState::new(vec![], RegistrationAction::Add);
        state.apply_session_info(vec![], Some(1_700_000_000_000.0));
        let instant = state.registration_instant().unwrap();
        assert_eq!(instant.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut state = SessionState::new(vec!["CS101".into()], RegistrationAction::Drop);
        state.apply_catalog(CatalogSnapshot::from_entries(&[json!({"id": "CS101", "units": 3})]));

        let snapshot = state.begin_dispatch();
        assert_eq!(state.phase(), SessionPhase::Dispatching);

        // A fresh catalog after dispatch start must not leak into the batch.
        state.apply_catalog(CatalogSnapshot::default());
        assert_eq!(snapshot.catalog.units_for("CS101"), 3);
        assert_eq!(snapshot.action, RegistrationAction::Drop);
    }
}

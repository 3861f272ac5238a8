use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::services::booking::BookingFacade;
use crate::services::clock::Clock;
use crate::services::selection::{BookingSelection, SelectionState};

pub struct AppState {
    pub config: AppConfig,
    pub facade: BookingFacade,
    pub clock: Arc<dyn Clock>,
    pub selections: SelectionSessions,
}

impl AppState {
    pub fn new(config: AppConfig, facade: BookingFacade, clock: Arc<dyn Clock>) -> Self {
        let idle = Duration::minutes(i64::from(config.selection_idle_minutes));
        Self {
            config,
            facade,
            clock,
            selections: SelectionSessions::new(idle),
        }
    }
}

struct Session {
    selection: BookingSelection,
    last_seen: DateTime<Utc>,
}

/// Open booking modals, keyed by session id.
///
/// Sessions untouched for longer than `idle` are dropped whenever a new one
/// opens, unless they are waiting on a booking to be created.
pub struct SelectionSessions {
    sessions: Mutex<HashMap<Uuid, Session>>,
    idle: Duration,
}

impl SelectionSessions {
    pub fn new(idle: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn open(&self, id: Uuid, selection: BookingSelection, now: DateTime<Utc>) {
        let mut sessions = self.lock();

        let before = sessions.len();
        sessions.retain(|_, s| {
            s.selection.state() == SelectionState::Submitting || now - s.last_seen <= self.idle
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "idle selections evicted");
        }

        sessions.insert(
            id,
            Session {
                selection,
                last_seen: now,
            },
        );
    }

    /// Runs `f` on one session while holding the lock. `None` if the session
    /// is gone. Never await inside `f`.
    pub fn with<T>(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut BookingSelection) -> T,
    ) -> Option<T> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(&id)?;
        session.last_seen = now;
        Some(f(&mut session.selection))
    }

    pub fn close(&self, id: Uuid) -> Option<BookingSelection> {
        self.lock().remove(&id).map(|s| s.selection)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        today().and_hms_opt(12, 0, 0).unwrap().and_utc() + Duration::minutes(minutes)
    }

    #[test]
    fn test_idle_sessions_evicted_on_open() {
        let sessions = SelectionSessions::new(Duration::minutes(30));
        let stale = Uuid::new_v4();
        let active = Uuid::new_v4();
        sessions.open(stale, BookingSelection::new(1, today()), at(0));
        sessions.open(active, BookingSelection::new(1, today()), at(0));

        // touching keeps a session alive
        assert!(sessions.with(active, at(20), |_| ()).is_some());

        sessions.open(Uuid::new_v4(), BookingSelection::new(2, today()), at(45));
        assert_eq!(sessions.len(), 2);
        assert!(sessions.with(stale, at(45), |_| ()).is_none());
        assert!(sessions.with(active, at(45), |_| ()).is_some());
    }

    #[test]
    fn test_submitting_session_survives_eviction() {
        let sessions = SelectionSessions::new(Duration::minutes(30));
        let id = Uuid::new_v4();
        let mut selection = BookingSelection::new(1, today());
        selection
            .select_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), today())
            .unwrap();
        selection.select_time("09:00").unwrap();
        selection.begin_submit(Some(7)).unwrap();
        sessions.open(id, selection, at(0));

        sessions.open(Uuid::new_v4(), BookingSelection::new(1, today()), at(120));
        assert_eq!(
            sessions.with(id, at(120), |s| s.state()),
            Some(SelectionState::Submitting)
        );
    }

    #[test]
    fn test_close() {
        let sessions = SelectionSessions::new(Duration::minutes(30));
        let id = Uuid::new_v4();
        sessions.open(id, BookingSelection::new(3, today()), at(0));
        assert_eq!(sessions.close(id).map(|s| s.service_id()), Some(3));
        assert!(sessions.close(id).is_none());
        assert!(sessions.is_empty());
    }
}

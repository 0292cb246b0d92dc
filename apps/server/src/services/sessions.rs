//! In-memory store of live study sessions.
//!
//! One mutex guards every session, so two commands for the same session can
//! never interleave.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use study_core::StudySession;
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// A session plus what the input screen needs to come back to it.
#[derive(Debug)]
pub struct SessionEntry {
    pub session: StudySession,
    /// Raw text the session was started from, kept for re-editing.
    pub source_text: String,
    pub skipped_lines: usize,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionEntry {
    pub fn new(session: StudySession, source_text: String, skipped_lines: usize) -> Self {
        let now = Utc::now();
        Self {
            session,
            source_text,
            skipped_lines,
            created_at: now,
            last_active_at: now,
        }
    }
}

pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Store a new session, first dropping sessions idle past the timeout.
    pub fn insert(&self, id: Uuid, entry: SessionEntry) -> Result<()> {
        let mut sessions = self.lock()?;

        let cutoff = Utc::now() - self.idle_timeout;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_active_at >= cutoff);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!("Evicted {} idle study sessions", evicted);
        }

        sessions.insert(id, entry);
        Ok(())
    }

    /// Run `f` on a session while holding the store lock.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionEntry) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.lock()?;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Session {} not found", id)))?;
        entry.last_active_at = Utc::now();
        f(entry)
    }

    pub fn remove(&self, id: Uuid) -> Result<bool> {
        Ok(self.lock()?.remove(&id).is_some())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, SessionEntry>>> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::{parse, Outcome};

    fn entry() -> SessionEntry {
        let text = "look | 看\nhello | 你好".to_string();
        let cards = parse(&text).unwrap().into_cards().unwrap();
        let mut session = StudySession::with_seed(1);
        session.start(cards, false).unwrap();
        SessionEntry::new(session, text, 0)
    }

    #[test]
    fn commands_reach_stored_session() {
        let store = SessionStore::new(Duration::minutes(5));
        let id = Uuid::new_v4();
        store.insert(id, entry()).unwrap();

        store
            .with_session(id, |entry| Ok(entry.session.classify(Outcome::Mastered)?))
            .unwrap();

        let completed = store
            .with_session(id, |entry| Ok(entry.session.progress().completed))
            .unwrap();
        assert_eq!(completed, 1);
    }

    #[test]
    fn unknown_session_is_not_found() {
        let store = SessionStore::new(Duration::minutes(5));
        let result = store.with_session(Uuid::new_v4(), |_| Ok(()));
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn idle_sessions_are_evicted_on_insert() {
        let store = SessionStore::new(Duration::minutes(5));
        let stale = Uuid::new_v4();
        let mut old = entry();
        old.last_active_at = Utc::now() - Duration::minutes(10);
        store.insert(stale, old).unwrap();

        store.insert(Uuid::new_v4(), entry()).unwrap();

        assert_eq!(store.len().unwrap(), 1);
        assert!(store.with_session(stale, |_| Ok(())).is_err());
    }

    #[test]
    fn remove_reports_whether_session_existed() {
        let store = SessionStore::new(Duration::minutes(5));
        let id = Uuid::new_v4();
        store.insert(id, entry()).unwrap();

        assert!(store.remove(id).unwrap());
        assert!(!store.remove(id).unwrap());
        assert!(store.is_empty().unwrap());
    }
}

//! In-memory conversation store.
//!
//! Maps session ids to their ordered turns for the lifetime of the process.
//! Backed by a sharded concurrent map: every mutation holds the shard lock
//! for that key only while it runs, and reads hand out cloned snapshots, so
//! no lock is ever held across an await point.

use crate::models::{SessionId, Turn};
use crate::services::metrics;
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, Vec<Turn>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, empty session under a freshly generated id.
    pub fn create_session(&self) -> SessionId {
        let session_id = loop {
            let candidate = SessionId::generate();
            if !self.sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        self.sessions.insert(session_id.clone(), Vec::new());
        metrics::set_active_sessions(self.sessions.len());

        tracing::debug!(session_id = %session_id, "Session created");
        session_id
    }

    /// Append a turn, creating the session first if it is unknown.
    pub fn append_turn(&self, session_id: &SessionId, turn: Turn) {
        self.get_or_create(session_id).push(turn);
        metrics::set_active_sessions(self.sessions.len());
    }

    /// Snapshot of the session's turns, oldest first. Empty when unknown.
    pub fn get_history(&self, session_id: &SessionId) -> Vec<Turn> {
        self.sessions
            .get(session_id)
            .map(|turns| turns.value().clone())
            .unwrap_or_default()
    }

    /// Drop the session and all of its turns.
    pub fn clear_session(&self, session_id: &SessionId) {
        if self.sessions.remove(session_id).is_some() {
            metrics::set_active_sessions(self.sessions.len());
            tracing::debug!(session_id = %session_id, "Session cleared");
        }
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn get_or_create(&self, session_id: &SessionId) -> RefMut<'_, SessionId, Vec<Turn>> {
        self.sessions.entry(session_id.clone()).or_insert_with(|| {
            tracing::debug!(session_id = %session_id, "Session created on append");
            Vec::new()
        })
    }
}

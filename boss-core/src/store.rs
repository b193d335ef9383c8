//! Process-local session registry.
//!
//! A host serving several players keeps one [`GameSession`] per session
//! key. Sessions never see each other, so the store needs no locking of its
//! own; wrap it in a mutex if it is shared across tasks.

use crate::session::GameSession;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::time::Instant;
use uuid::Uuid;

/// Unique identifier for a player session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new unique session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory map of live sessions. Nothing is persisted.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, GameSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with default values and return its key.
    pub fn create(&mut self, now: Instant) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, GameSession::new(now));
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&id)
    }

    /// Fetch a session, creating it on first access.
    pub fn get_or_create(&mut self, id: SessionId, now: Instant) -> &mut GameSession {
        self.sessions
            .entry(id)
            .or_insert_with(|| GameSession::new(now))
    }

    /// Discard a session when the player leaves.
    pub fn remove(&mut self, id: SessionId) -> Option<GameSession> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

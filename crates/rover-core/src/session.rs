//! Session token issuance and lookup.
//!
//! A session is an opaque `sim-<uuid>` token. It authorizes access to the
//! shared world but does not partition it: every session sees and drives
//! the same rover. Sessions do not time out; a world reset revokes them all.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rover_types::SessionId;
use tracing::{debug, info};

/// Bookkeeping for one issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// The token.
    pub id: SessionId,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
    /// The last time the token passed a session check.
    pub last_active: DateTime<Utc>,
}

/// Tokens issued since the last reset.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token.
    pub fn create(&mut self, now: DateTime<Utc>) -> SessionId {
        let mut id = SessionId::new();
        // Never overwrite a live session.
        while self.sessions.contains_key(&id) {
            id = SessionId::new();
        }
        self.sessions.insert(
            id,
            Session {
                id,
                created_at: now,
                last_active: now,
            },
        );
        info!(session = %id, total = self.sessions.len(), "Session created");
        id
    }

    /// Whether `id` was issued by this store. A known token has its
    /// `last_active` refreshed to `now`; an unknown one changes nothing.
    pub fn check(&mut self, id: &SessionId, now: DateTime<Utc>) -> bool {
        match self.sessions.get_mut(id) {
            Some(session) => {
                session.last_active = now;
                true
            }
            None => {
                debug!(session = %id, "Unknown session token");
                false
            }
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Revoke every token. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let revoked = self.sessions.len();
        self.sessions.clear();
        revoked
    }
}

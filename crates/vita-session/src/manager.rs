use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;
use vita_core::Message;

use crate::error::{SessionError, SessionResult};
use crate::types::Session;

/// Keeps every live session in memory, keyed by id. Sessions are isolated
/// from one another; the map is the only shared state and DashMap carries
/// the locking.
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<String, Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create a fresh, empty session and return its id
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), Session::new(&id));
        debug!(session_id = %id, "session created");
        id
    }

    /// Fetch an existing session by id, creating it when absent
    pub fn get_or_create(&self, id: &str) -> String {
        if !self.sessions.contains_key(id) {
            self.sessions.insert(id.to_string(), Session::new(id));
            debug!(session_id = %id, "session created on first use");
        }
        id.to_string()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    /// Append one turn to a session
    pub fn append(&self, id: &str, message: Message) -> SessionResult<()> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound { id: id.to_string() })?;
        session.push(message);
        Ok(())
    }

    /// The full ordered history of a session
    pub fn history(&self, id: &str) -> SessionResult<Vec<Message>> {
        let session = self
            .sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound { id: id.to_string() })?;
        Ok(session.messages().to_vec())
    }

    pub fn message_count(&self, id: &str) -> SessionResult<usize> {
        let session = self
            .sessions
            .get(id)
            .ok_or_else(|| SessionError::NotFound { id: id.to_string() })?;
        Ok(session.len())
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle beyond the TTL; returns how many were removed
    pub fn sweep_expired(&self, idle_ttl: Duration) -> usize {
        let ttl = chrono::Duration::from_std(idle_ttl).unwrap_or(chrono::Duration::MAX);
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().idle_for() > ttl)
            .map(|entry| entry.key().clone())
            .collect();

        for id in &expired {
            self.sessions.remove(id);
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "swept expired sessions");
        }
        expired.len()
    }

    /// Run the expiry sweep on an interval until the process exits
    pub fn spawn_cleanup(self: &Arc<Self>, interval: Duration, idle_ttl: Duration) {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick fires immediately
            loop {
                ticker.tick().await;
                manager.sweep_expired(idle_ttl);
            }
        });
    }
}

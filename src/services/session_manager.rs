// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::session::Role;

/// One question or answer as the stub backend remembers it.
#[derive(Clone, Debug)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub at: Instant,
}

#[derive(Clone, Debug)]
struct TutorSession {
    turns: Vec<Turn>,
    last_active: Instant,
}

impl TutorSession {
    fn new() -> Self {
        Self {
            turns: Vec::new(),
            last_active: Instant::now(),
        }
    }
}

/// Backend-side tutor sessions keyed by the token handed to clients.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, TutorSession>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Resolve the token a client sent. Unknown or expired tokens are
    /// re-registered under the same id; a missing or blank one gets a new id.
    pub async fn resolve(&self, token: Option<&str>) -> String {
        match token.map(str::trim) {
            Some(id) if !id.is_empty() => self.ensure_session(id).await,
            _ => self.create_session().await,
        }
    }

    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.inner.write().await.insert(id.clone(), TutorSession::new());
        id
    }

    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        self.inner
            .write()
            .await
            .entry(id.to_string())
            .or_insert_with(TutorSession::new);
        id.to_string()
    }

    /// Append to a session's history and touch it. Returns the new length.
    pub async fn append(&self, session_id: &str, role: Role, content: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        let session = guard
            .entry(session_id.to_string())
            .or_insert_with(TutorSession::new);
        let now = Instant::now();
        session.turns.push(Turn {
            role,
            content: content.into(),
            at: now,
        });
        session.last_active = now;
        session.turns.len()
    }

    pub async fn history(&self, session_id: &str) -> Option<Vec<Turn>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.turns.clone())
    }

    pub async fn remove(&self, session_id: &str) -> bool {
        self.inner.write().await.remove(session_id).is_some()
    }

    /// Drop sessions idle longer than the ttl. Returns how many went.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

//! Session store for the HTTP transport.
//!
//! Maps `mcp-session-id` values to per-client state. The store is created
//! once by the transport and shared with every handler through `AppState`.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// State kept for one client session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Set once the client sends `notifications/initialized`.
    pub initialized: bool,
    /// Protocol version agreed during `initialize`.
    pub protocol_version: String,
    pub created_at: DateTime<Utc>,
}

/// Shared map of live sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its id.
    ///
    /// A caller-supplied id is kept as is; otherwise a UUID v4 is generated.
    /// Opening an id that already exists resets its state.
    pub async fn create(&self, requested: Option<&str>, protocol_version: &str) -> String {
        let id = requested
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let state = SessionState {
            initialized: false,
            protocol_version: protocol_version.to_string(),
            created_at: Utc::now(),
        };

        let replaced = self.sessions.write().await.insert(id.clone(), state);
        if replaced.is_some() {
            info!("MCP session re-initialized: {}", id);
        } else {
            info!("MCP session initialized: {}", id);
        }
        id
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    pub async fn get(&self, id: &str) -> Option<SessionState> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Mark a session as initialized. Returns `false` for unknown ids.
    pub async fn mark_initialized(&self, id: &str) -> bool {
        match self.sessions.write().await.get_mut(id) {
            Some(state) => {
                state.initialized = true;
                true
            }
            None => false,
        }
    }

    /// Close a session. Returns `false` for unknown ids.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!("MCP session closed: {}", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

//! Foreground session tracking.
//!
//! A session is a connected foreground surface (an open application
//! window). The action router prefers focusing an existing session and
//! posting it a structured message over opening a new one.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use beacon_core::result::AppResult;

/// Message posted to a foreground session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ForegroundMessage {
    /// The user activated a notification; the foreground should route
    /// internally instead of reloading.
    #[serde(rename = "NOTIFICATION_CLICKED")]
    NotificationClicked {
        action: Option<String>,
        data: Value,
        url: String,
    },
    /// A new delivery process instance has claimed this session.
    #[serde(rename = "CONTROLLER_CHANGED")]
    ControllerChanged,
}

/// Session operations the action router and lifecycle controller need.
#[async_trait]
pub trait SessionHub: Send + Sync {
    /// Post a message to the oldest open session and focus it. Returns
    /// `false` when no session is open.
    async fn focus_first(&self, message: ForegroundMessage) -> AppResult<bool>;

    /// Open a new session at the given URL.
    async fn open(&self, url: &str) -> AppResult<()>;

    /// Claim every open session for the current process instance.
    /// Returns the number of sessions claimed.
    async fn claim_all(&self) -> usize;
}

struct SessionHandle {
    seq: u64,
    sender: mpsc::Sender<ForegroundMessage>,
}

/// In-process session registry. Each registered session gets an mpsc
/// receiver for foreground messages; launch requests for new sessions go
/// out on a broadcast channel the host shell subscribes to.
pub struct SessionRegistry {
    sessions: DashMap<Uuid, SessionHandle>,
    next_seq: AtomicU64,
    launches: broadcast::Sender<String>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        let (launches, _) = broadcast::channel(16);
        Self {
            sessions: DashMap::new(),
            next_seq: AtomicU64::new(0),
            launches,
        }
    }

    /// Register a session. Returns its id and the message receiver.
    pub fn register(&self) -> (Uuid, mpsc::Receiver<ForegroundMessage>) {
        let (tx, rx) = mpsc::channel(16);
        let id = Uuid::new_v4();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.sessions.insert(id, SessionHandle { seq, sender: tx });
        debug!(session_id = %id, "Session registered");
        (id, rx)
    }

    /// Remove a session.
    pub fn unregister(&self, id: Uuid) {
        if self.sessions.remove(&id).is_some() {
            debug!(session_id = %id, "Session unregistered");
        }
    }

    /// Number of currently open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Subscribe to launch requests for new sessions.
    pub fn subscribe_launches(&self) -> broadcast::Receiver<String> {
        self.launches.subscribe()
    }

    fn oldest(&self) -> Option<Uuid> {
        self.sessions
            .iter()
            .min_by_key(|entry| entry.value().seq)
            .map(|entry| *entry.key())
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionHub for SessionRegistry {
    async fn focus_first(&self, message: ForegroundMessage) -> AppResult<bool> {
        let Some(id) = self.oldest() else {
            return Ok(false);
        };
        let Some(handle) = self.sessions.get(&id) else {
            return Ok(false);
        };
        if handle.sender.send(message).await.is_err() {
            // Receiver dropped without unregistering.
            drop(handle);
            self.sessions.remove(&id);
            warn!(session_id = %id, "Dropped dead session");
            return Ok(false);
        }
        debug!(session_id = %id, "Focused session");
        Ok(true)
    }

    async fn open(&self, url: &str) -> AppResult<()> {
        // No shell listening means the launch is dropped, same as an OS
        // refusing to open a window in the background.
        if self.launches.send(url.to_string()).is_err() {
            debug!(url, "No shell subscribed for launch request");
        }
        Ok(())
    }

    async fn claim_all(&self) -> usize {
        let mut claimed = 0;
        for entry in self.sessions.iter() {
            if entry
                .value()
                .sender
                .send(ForegroundMessage::ControllerChanged)
                .await
                .is_ok()
            {
                claimed += 1;
            }
        }
        info!(claimed, "Claimed open sessions");
        claimed
    }
}

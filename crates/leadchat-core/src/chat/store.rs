//! In-memory session store for the HTTP boundary.
//!
//! Each session lives behind its own async mutex: one action per session
//! runs to completion (including its LLM call) before the next is accepted,
//! while different sessions proceed independently. Nothing survives a
//! process restart, and sessions nobody has looked up for a while are
//! swept out.

use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use super::session::SessionState;

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<SessionState>>;

struct StoredSession {
    handle: SessionHandle,
    last_active: Instant,
}

/// Maps session ids to exclusively owned session states.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, StoredSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its id.
    pub fn insert(&self, state: SessionState) -> Uuid {
        let id = state.id();
        self.sessions.insert(
            id,
            StoredSession {
                handle: Arc::new(Mutex::new(state)),
                last_active: Instant::now(),
            },
        );
        debug!(session_id = %id, active = self.sessions.len(), "Session registered");
        id
    }

    /// Look up a session by id, marking it active.
    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        self.sessions.get_mut(id).map(|mut entry| {
            entry.last_active = Instant::now();
            entry.handle.clone()
        })
    }

    /// Drop a session. Returns false if it did not exist.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            debug!(session_id = %id, active = self.sessions.len(), "Session removed");
        }
        removed
    }

    /// Drop every session idle for longer than `max_idle`.
    ///
    /// A session whose handle is still held by a caller is kept regardless.
    /// Returns the number of sessions dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| {
            Arc::strong_count(&entry.handle) > 1 || entry.last_active.elapsed() <= max_idle
        });
        before.saturating_sub(self.sessions.len())
    }

    /// Run [`evict_idle`](Self::evict_idle) periodically in the background.
    ///
    /// The task stops on its own once the store is dropped.
    pub fn spawn_idle_sweeper(self: &Arc<Self>, max_idle: Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        let period = (max_idle / 4).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let evicted = store.evict_idle(max_idle);
                if evicted > 0 {
                    info!(evicted, active = store.len(), "Evicted idle sessions");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

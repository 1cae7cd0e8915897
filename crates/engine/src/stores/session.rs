//! Live game session storage.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use bosscoax_domain::{Session, SessionId};

use crate::infrastructure::ports::ClockPort;

/// Idle time after which an untouched session is dropped.
pub const DEFAULT_SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Shared handle to one session. The mutex serializes turns.
pub type SessionHandle = Arc<Mutex<Session>>;

struct StoredSession {
    handle: SessionHandle,
    last_touched: DateTime<Utc>,
}

/// In-memory session store keyed by session id.
///
/// Sessions are independent: a lock on one never blocks another. Sessions
/// nobody has read or locked for `idle_ttl` are evicted on the next
/// [`SessionStore::evict_idle`] sweep; a session whose turn is still running
/// is never evicted.
pub struct SessionStore {
    sessions: DashMap<SessionId, StoredSession>,
    clock: Arc<dyn ClockPort>,
    idle_ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(clock: Arc<dyn ClockPort>, idle_ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
            idle_ttl: chrono::Duration::from_std(idle_ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    pub fn insert(&self, session: Session) -> SessionHandle {
        self.evict_idle();

        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(
            id,
            StoredSession {
                handle: handle.clone(),
                last_touched: self.clock.now(),
            },
        );
        handle
    }

    pub fn get(&self, id: SessionId) -> Option<SessionHandle> {
        let now = self.clock.now();
        self.sessions.get_mut(&id).map(|mut entry| {
            entry.last_touched = now;
            entry.handle.clone()
        })
    }

    /// Lock a session without waiting. `None` means no such session;
    /// [`SessionBusy`] means another request holds it.
    pub fn try_lock(&self, id: SessionId) -> Option<Result<OwnedMutexGuard<Session>, SessionBusy>> {
        self.get(id)
            .map(|handle| handle.try_lock_owned().map_err(|_| SessionBusy))
    }

    pub fn remove(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.remove(&id).map(|(_, stored)| stored.handle)
    }

    /// Drop sessions idle for longer than the TTL. Returns how many went.
    pub fn evict_idle(&self) -> usize {
        let cutoff = self
            .clock
            .now()
            .checked_sub_signed(self.idle_ttl)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut evicted = 0;

        self.sessions.retain(|id, stored| {
            let keep = stored.last_touched > cutoff || stored.handle.try_lock().is_err();
            if !keep {
                tracing::info!(
                    session_id = %id,
                    last_touched = %stored.last_touched,
                    "Evicting idle session"
                );
                evicted += 1;
            }
            keep
        });

        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Another request is currently holding the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBusy;

//! Session preference storage.
//!
//! The core only sees the [`SessionStore`] trait. [`MemorySessionStore`]
//! keeps everything in process memory, so every session is forgotten when
//! the process restarts. Sessions idle for longer than the store's TTL
//! expire and load as defaults again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SessionId;
use crate::domain::Preferences;
use crate::error::AppError;

/// Storage for per-session [`Preferences`].
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the preferences for `id`, or defaults if none were saved.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] if the backing store is unavailable.
    async fn load(&self, id: SessionId) -> Result<Preferences, AppError>;

    /// Replaces the preferences stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] if the backing store is unavailable.
    async fn save(&self, id: SessionId, prefs: Preferences) -> Result<(), AppError>;
}

#[derive(Debug)]
struct SessionEntry {
    prefs: Preferences,
    last_seen: Instant,
}

/// In-process session store with idle expiry.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Creates an empty store whose sessions expire after `ttl` without
    /// a load or save.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Drops every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now()).await
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) > self.ttl
    }

    async fn load_at(&self, id: SessionId, now: Instant) -> Preferences {
        let mut sessions = self.sessions.write().await;
        if sessions.get(&id).is_some_and(|entry| self.is_expired(entry, now)) {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "expired session dropped");
        }
        sessions
            .get_mut(&id)
            .map_or_else(Preferences::default, |entry| {
                entry.last_seen = now;
                entry.prefs.clone()
            })
    }

    async fn save_at(&self, id: SessionId, prefs: Preferences, now: Instant) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        sessions.insert(
            id,
            SessionEntry {
                prefs,
                last_seen: now,
            },
        );
    }

    async fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));
        before - sessions.len()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: SessionId) -> Result<Preferences, AppError> {
        Ok(self.load_at(id, Instant::now()).await)
    }

    async fn save(&self, id: SessionId, prefs: Preferences) -> Result<(), AppError> {
        self.save_at(id, prefs, Instant::now()).await;
        Ok(())
    }
}

/// Periodically purges expired sessions from `store`. Runs until the
/// runtime shuts down.
pub async fn sweep_expired(store: Arc<MemorySessionStore>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let purged = store.purge_expired().await;
        if purged > 0 {
            tracing::debug!(purged, "expired sessions purged");
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::TagId;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn unknown_session_loads_defaults() {
        let store = MemorySessionStore::new(TTL);
        let Ok(prefs) = store.load(SessionId::new()).await else {
            panic!("load failed");
        };
        assert_eq!(prefs, Preferences::default());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = MemorySessionStore::new(TTL);
        let (a, b) = (SessionId::new(), SessionId::new());

        let mut prefs = Preferences::default();
        prefs.add_search_tag(TagId::new(1));
        prefs.set_sort(true, false);
        assert!(store.save(a, prefs.clone()).await.is_ok());

        assert!(matches!(store.load(a).await, Ok(p) if p == prefs));
        assert!(matches!(store.load(b).await, Ok(p) if p == Preferences::default()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn idle_session_expires_to_defaults() {
        let store = MemorySessionStore::new(TTL);
        let id = SessionId::new();
        let start = Instant::now();

        let mut prefs = Preferences::default();
        prefs.set_search_text("kept");
        store.save_at(id, prefs.clone(), start).await;

        // A load inside the TTL renews the session.
        assert_eq!(store.load_at(id, start + Duration::from_secs(50)).await, prefs);
        assert_eq!(store.load_at(id, start + Duration::from_secs(100)).await, prefs);

        let later = start + Duration::from_secs(100) + TTL + Duration::from_secs(1);
        assert_eq!(store.load_at(id, later).await, Preferences::default());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn abandoned_sessions_do_not_accumulate() {
        let store = MemorySessionStore::new(TTL);
        let start = Instant::now();
        for _ in 0..500 {
            store
                .save_at(SessionId::new(), Preferences::default(), start)
                .await;
        }
        assert_eq!(store.len().await, 500);

        let later = start + TTL + Duration::from_secs(1);
        store
            .save_at(SessionId::new(), Preferences::default(), later)
            .await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn purge_removes_only_expired_sessions() {
        let store = MemorySessionStore::new(TTL);
        let start = Instant::now();
        let (old, fresh) = (SessionId::new(), SessionId::new());
        store.save_at(old, Preferences::default(), start).await;
        store
            .save_at(fresh, Preferences::default(), start + Duration::from_secs(30))
            .await;

        assert_eq!(store.purge_expired_at(start + Duration::from_secs(70)).await, 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.purge_expired_at(start + Duration::from_secs(70)).await, 0);
    }
}

//! # Session Context
//!
//! The one session a client holds, shared by clone between every component
//! that issues requests.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SessionContext                                   │
//! │                                                                         │
//! │   current: Arc<RwLock<Option<Session>>>    ◄── read at send time        │
//! │   store:   Arc<dyn SessionStore>           ◄── durable copy             │
//! │                                                                         │
//! │   establish(s)  memory = Some(s), store.save(s)                        │
//! │   clear()       memory = None,    store.clear()                        │
//! │                                                                         │
//! │   Last write wins. A logout racing an in-flight call may see that      │
//! │   call's 401 clear again; clearing is idempotent.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Memory is updated first so a failing disk never leaves a stale token
//! attached to requests.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use bizdesk_core::Session;

use crate::error::ClientResult;
use crate::storage::SessionStore;

/// Shared handle to the current session and its durable store.
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Starts with no session, regardless of what the store holds.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        SessionContext {
            current: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Starts from whatever the durable store holds.
    ///
    /// A store that cannot be read yields an empty session.
    pub fn restore(store: Arc<dyn SessionStore>) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Could not read stored session");
                None
            }
        };

        if let Some(ref session) = restored {
            info!(role = %session.role, "Restored stored session");
        }

        SessionContext {
            current: Arc::new(RwLock::new(restored)),
            store,
        }
    }

    /// Current session, if any.
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Bearer token to attach right now.
    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Role of the current session.
    pub async fn role(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.role.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Replaces the session in memory and in the durable store.
    ///
    /// The in-memory session is set even if persisting fails; the error is
    /// returned so the caller can log it.
    pub async fn establish(&self, session: Session) -> ClientResult<()> {
        {
            let mut guard = self.current.write().await;
            *guard = Some(session.clone());
        }
        debug!(role = %session.role, "Session established");
        self.store.save(&session)
    }

    /// Drops the session from memory and the durable store. Idempotent.
    pub async fn clear(&self) -> ClientResult<()> {
        let previous = {
            let mut guard = self.current.write().await;
            guard.take()
        };
        if previous.is_some() {
            debug!("Session cleared");
        }
        self.store.clear()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStore;

    #[tokio::test]
    async fn test_restore_from_store() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("T", "admin")));
        let ctx = SessionContext::restore(store);

        assert_eq!(ctx.token().await.as_deref(), Some("T"));
        assert_eq!(ctx.role().await.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_new_ignores_store() {
        let store = Arc::new(MemorySessionStore::with_session(Session::new("T", "admin")));
        let ctx = SessionContext::new(store);
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_establish_and_clear_reach_store() {
        let store = Arc::new(MemorySessionStore::new());
        let ctx = SessionContext::new(store.clone());

        ctx.establish(Session::new("T", "owner")).await.unwrap();
        assert_eq!(store.load().unwrap(), Some(Session::new("T", "owner")));

        ctx.clear().await.unwrap();
        assert_eq!(ctx.token().await, None);
        assert_eq!(store.load().unwrap(), None);

        // Clearing an empty session is a no-op.
        ctx.clear().await.unwrap();
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ctx = SessionContext::new(Arc::new(MemorySessionStore::new()));
        let other = ctx.clone();

        ctx.establish(Session::new("T", "staff")).await.unwrap();
        assert_eq!(other.token().await.as_deref(), Some("T"));

        other.clear().await.unwrap();
        assert!(!ctx.is_authenticated().await);
    }
}

//! The shared session store.
//!
//! One value, many observers: the store wraps a [`tokio::sync::watch`]
//! channel so the HTTP layer and any number of consumers can react to
//! login/logout without reaching into globals. Writers are the explicit
//! login/logout calls and the gateway's 401 guard.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};
use zehnly_core::AdminUser;

use crate::credentials::CredentialStore;
use crate::error::SessionResult;
use crate::types::Session;

/// Persisted flag entry; holds the literal string `"true"` when signed in
pub const IS_AUTHENTICATED_KEY: &str = "zehnly_is_authenticated";
/// Persisted entry holding the JSON-serialized admin user
pub const USER_DATA_KEY: &str = "zehnly_user_data";

/// In-memory login state, mirrored to a [`CredentialStore`].
///
/// Cheap to share: callers hold it behind an `Arc` and every method takes
/// `&self`. State changes go through the watch channel, so a clear caused
/// by N racing 401s publishes exactly one transition.
pub struct SessionStore {
    state: watch::Sender<Session>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionStore {
    /// Build a store from previously persisted entries.
    ///
    /// The session starts authenticated only if the flag entry is the
    /// string `"true"` and the user entry parses; anything else (missing
    /// entries, corrupt JSON, a read error) degrades to signed out.
    pub async fn load(credentials: Arc<dyn CredentialStore>) -> Self {
        let initial = Self::rehydrate(credentials.as_ref()).await;
        let (state, _) = watch::channel(initial);
        Self { state, credentials }
    }

    async fn rehydrate(credentials: &dyn CredentialStore) -> Session {
        let flag = match credentials.get(IS_AUTHENTICATED_KEY).await {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to read session flag: {e}");
                return Session::signed_out();
            }
        };
        if flag.as_deref() != Some("true") {
            return Session::signed_out();
        }

        let raw_user = match credentials.get(USER_DATA_KEY).await {
            Ok(Some(value)) => value,
            Ok(None) => return Session::signed_out(),
            Err(e) => {
                warn!("failed to read stored user: {e}");
                return Session::signed_out();
            }
        };
        match serde_json::from_str::<AdminUser>(&raw_user) {
            Ok(user) => {
                debug!(email = %user.email, "session rehydrated");
                Session::authenticated(user)
            }
            Err(e) => {
                warn!("stored user entry is corrupt, starting signed out: {e}");
                Session::signed_out()
            }
        }
    }

    /// Current session value
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// Watch for session changes
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Record a successful login.
    ///
    /// Persists both entries first; the in-memory session only flips to
    /// authenticated once persistence succeeded, so a user is "logged in"
    /// iff the next startup will also see it.
    pub async fn login(&self, user: AdminUser) -> SessionResult<()> {
        let serialized = serde_json::to_string(&user)?;
        self.credentials.set(IS_AUTHENTICATED_KEY, "true").await?;
        self.credentials.set(USER_DATA_KEY, &serialized).await?;

        debug!(email = %user.email, "session established");
        self.state.send_replace(Session::authenticated(user));
        Ok(())
    }

    /// Clear the session.
    ///
    /// Always succeeds locally: the in-memory state is reset first and a
    /// failure to delete the persisted entries is logged, never surfaced.
    /// Returns whether this call performed the transition; concurrent
    /// callers (say, several in-flight requests all answered with 401)
    /// get `true` at most once, and subscribers see a single change.
    pub async fn logout(&self) -> bool {
        let cleared = self.state.send_if_modified(|session| {
            if session.is_authenticated || session.user.is_some() {
                *session = Session::signed_out();
                true
            } else {
                false
            }
        });

        if cleared {
            debug!("session cleared");
            if let Err(e) = self.credentials.remove(IS_AUTHENTICATED_KEY).await {
                warn!("failed to remove session flag: {e}");
            }
            if let Err(e) = self.credentials.remove(USER_DATA_KEY).await {
                warn!("failed to remove stored user: {e}");
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::error::{SessionError, SessionResult};
    use async_trait::async_trait;

    fn seeded_store() -> Arc<MemoryCredentialStore> {
        Arc::new(MemoryCredentialStore::with_entries([
            (IS_AUTHENTICATED_KEY.to_string(), "true".to_string()),
            (
                USER_DATA_KEY.to_string(),
                r#"{"id":1,"email":"admin@zehnly.ai","role":"admin"}"#.to_string(),
            ),
        ]))
    }

    #[tokio::test]
    async fn test_rehydrates_from_persisted_entries() {
        let session = SessionStore::load(seeded_store()).await;
        assert!(session.is_authenticated());
        let user = session.current().user.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "admin@zehnly.ai");
    }

    #[tokio::test]
    async fn test_rehydration_requires_flag() {
        let credentials = Arc::new(MemoryCredentialStore::with_entries([(
            USER_DATA_KEY.to_string(),
            r#"{"id":1,"email":"admin@zehnly.ai","role":"admin"}"#.to_string(),
        )]));
        let session = SessionStore::load(credentials).await;
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_rehydration_with_corrupt_user_starts_signed_out() {
        let credentials = Arc::new(MemoryCredentialStore::with_entries([
            (IS_AUTHENTICATED_KEY.to_string(), "true".to_string()),
            (USER_DATA_KEY.to_string(), "not json".to_string()),
        ]));
        let session = SessionStore::load(credentials).await;
        assert!(!session.is_authenticated());
        assert!(session.current().user.is_none());
    }

    #[tokio::test]
    async fn test_login_persists_both_entries() {
        let credentials = Arc::new(MemoryCredentialStore::new());
        let session = SessionStore::load(credentials.clone()).await;

        session
            .login(AdminUser::new(7, "ops@zehnly.ai", "admin"))
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(
            credentials.get(IS_AUTHENTICATED_KEY).await.unwrap(),
            Some("true".to_string())
        );
        let raw = credentials.get(USER_DATA_KEY).await.unwrap().unwrap();
        let user: AdminUser = serde_json::from_str(&raw).unwrap();
        assert_eq!(user.email, "ops@zehnly.ai");
    }

    #[tokio::test]
    async fn test_logout_clears_exactly_once() {
        let session = SessionStore::load(seeded_store()).await;

        assert!(session.logout().await);
        assert!(!session.logout().await);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_concurrent_logout_single_transition() {
        let session = Arc::new(SessionStore::load(seeded_store()).await);

        let (a, b, c) = tokio::join!(
            {
                let s = session.clone();
                async move { s.logout().await }
            },
            {
                let s = session.clone();
                async move { s.logout().await }
            },
            {
                let s = session.clone();
                async move { s.logout().await }
            },
        );
        assert_eq!(
            [a, b, c].iter().filter(|cleared| **cleared).count(),
            1,
            "exactly one caller performs the clear"
        );
    }

    #[tokio::test]
    async fn test_logout_removes_persisted_entries() {
        let credentials = seeded_store();
        let session = SessionStore::load(credentials.clone()).await;

        session.logout().await;

        assert_eq!(credentials.get(IS_AUTHENTICATED_KEY).await.unwrap(), None);
        assert_eq!(credentials.get(USER_DATA_KEY).await.unwrap(), None);
    }

    /// Store whose deletes always fail, to prove local clear is unconditional
    struct BrokenCredentialStore;

    #[async_trait]
    impl CredentialStore for BrokenCredentialStore {
        async fn get(&self, _key: &str) -> SessionResult<Option<String>> {
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: &str) -> SessionResult<()> {
            Ok(())
        }
        async fn remove(&self, _key: &str) -> SessionResult<()> {
            Err(SessionError::storage("disk on fire"))
        }
    }

    #[tokio::test]
    async fn test_logout_clears_locally_when_persistence_fails() {
        let session = SessionStore::load(Arc::new(BrokenCredentialStore)).await;
        session
            .login(AdminUser::new(2, "admin@zehnly.ai", "admin"))
            .await
            .unwrap();

        assert!(session.logout().await);
        assert!(!session.is_authenticated());
        assert!(session.current().user.is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_login_and_logout() {
        let session = SessionStore::load(Arc::new(MemoryCredentialStore::new())).await;
        let mut changes = session.subscribe();

        session
            .login(AdminUser::new(3, "admin@zehnly.ai", "admin"))
            .await
            .unwrap();
        changes.changed().await.unwrap();
        assert!(changes.borrow_and_update().is_authenticated);

        session.logout().await;
        changes.changed().await.unwrap();
        assert!(!changes.borrow_and_update().is_authenticated);
    }
}

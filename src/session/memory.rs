//! In-memory session backend.
//!
//! Holds the session for the lifetime of the process. The default
//! choice for tests and for embedders that persist sessions themselves.

use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, WaitlessError};
use crate::models::AdminUser;

/// Thread-safe in-memory session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    /// All state behind a single mutex for thread-safe interior
    /// mutability.
    inner: Mutex<SessionState>,
}

/// Inner mutable session state.
#[derive(Debug, Default)]
struct SessionState {
    /// Current access token.
    access: Option<SecretString>,
    /// Current refresh token.
    refresh: Option<SecretString>,
    /// Persisted admin user record.
    user: Option<AdminUser>,
}

impl InMemorySessionStore {
    /// Creates a new empty session store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with tokens, convenient for tests
    /// and short-lived tools.
    #[inline]
    #[must_use]
    pub fn with_tokens(access: SecretString, refresh: Option<SecretString>) -> Self {
        Self {
            inner: Mutex::new(SessionState {
                access: Some(access),
                refresh,
                user: None,
            }),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut inner))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> WaitlessError {
    WaitlessError::Store(err.to_string().into())
}

/// Copies a secret out of the store.
fn copy_secret(secret: &SecretString) -> SecretString {
    SecretString::from(secret.expose_secret().to_owned())
}

impl super::SessionStore for InMemorySessionStore {
    #[inline]
    fn access_token(&self) -> Result<Option<SecretString>> {
        self.with_lock(|state| state.access.as_ref().map(copy_secret))
    }

    #[inline]
    fn refresh_token(&self) -> Result<Option<SecretString>> {
        self.with_lock(|state| state.refresh.as_ref().map(copy_secret))
    }

    #[inline]
    fn store_tokens(&self, access: SecretString, refresh: Option<SecretString>) -> Result<()> {
        self.with_lock(|state| {
            state.access = Some(access);
            if let Some(token) = refresh {
                state.refresh = Some(token);
            }
        })
    }

    #[inline]
    fn user(&self) -> Result<Option<AdminUser>> {
        self.with_lock(|state| state.user.clone())
    }

    #[inline]
    fn store_user(&self, user: AdminUser) -> Result<()> {
        self.with_lock(|state| state.user = Some(user))
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|state| *state = SessionState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_owned())
    }

    #[test]
    fn empty_store_has_no_session() {
        let store = InMemorySessionStore::new();
        assert!(store.access_token().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
        assert!(store.user().unwrap().is_none());
    }

    #[test]
    fn store_and_read_tokens() {
        let store = InMemorySessionStore::new();
        store
            .store_tokens(secret("acc-1"), Some(secret("ref-1")))
            .unwrap();
        let access = store.access_token().unwrap().unwrap();
        assert_eq!(access.expose_secret(), "acc-1");
        let refresh = store.refresh_token().unwrap().unwrap();
        assert_eq!(refresh.expose_secret(), "ref-1");
    }

    #[test]
    fn refresh_token_retained_when_not_rotated() {
        let store = InMemorySessionStore::with_tokens(secret("acc-1"), Some(secret("ref-1")));
        store.store_tokens(secret("acc-2"), None).unwrap();
        let access = store.access_token().unwrap().unwrap();
        assert_eq!(access.expose_secret(), "acc-2");
        let refresh = store.refresh_token().unwrap().unwrap();
        assert_eq!(refresh.expose_secret(), "ref-1");
    }

    #[test]
    fn store_and_read_user() {
        let store = InMemorySessionStore::new();
        let user = AdminUser {
            id: 1,
            name: "Dana Cole".to_owned(),
            email: "dana@example.com".to_owned(),
        };
        store.store_user(user.clone()).unwrap();
        assert_eq!(store.user().unwrap(), Some(user));
    }

    #[test]
    fn clear_wipes_everything() {
        let store = InMemorySessionStore::with_tokens(secret("acc"), Some(secret("ref")));
        store
            .store_user(AdminUser {
                id: 1,
                name: "Dana".to_owned(),
                email: "d@example.com".to_owned(),
            })
            .unwrap();
        store.clear().unwrap();
        assert!(store.access_token().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
        assert!(store.user().unwrap().is_none());
    }
}

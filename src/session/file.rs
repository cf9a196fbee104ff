//! JSON-file-backed session backend.
//!
//! Persists the session as a single JSON file (default:
//! `$XDG_DATA_HOME/waitless-admin-rs/session.json`), the library's
//! equivalent of the browser's fixed local-storage keys. Tokens are
//! stored in the clear, matching the original storage model; protect
//! the file with filesystem permissions.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WaitlessError};
use crate::models::AdminUser;

/// Application name used for the XDG data directory.
const APP_NAME: &str = "waitless-admin-rs";

/// Session file name.
const SESSION_FILE: &str = "session.json";

/// On-disk session shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    /// Access token, if a session exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    /// Refresh token, if one was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    /// Admin user record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<AdminUser>,
}

/// File-backed session store with atomic writes.
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]; writes go to a temporary file and are renamed into place.
#[derive(Debug)]
pub struct FileSessionStore {
    /// Full path of the session file.
    path: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a file session store at the given path.
    ///
    /// Creates the parent directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    #[inline]
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(store_io_error)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Returns the default XDG-compliant session file path.
    ///
    /// On Linux: `$XDG_DATA_HOME/waitless-admin-rs/session.json`
    /// (typically `~/.local/share/waitless-admin-rs/session.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined.
    #[inline]
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME).join(SESSION_FILE))
            .ok_or_else(|| {
                WaitlessError::Store("could not determine platform data directory".into())
            })
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Reads the persisted session, defaulting when the file is absent.
    fn read(&self) -> Result<PersistedSession> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(WaitlessError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(PersistedSession::default())
            }
            Err(err) => Err(store_io_error(err)),
        }
    }

    /// Atomically writes the session file (write-to-tmp then rename).
    fn write(&self, session: &PersistedSession) -> Result<()> {
        let json = serde_json::to_string_pretty(session).map_err(WaitlessError::from)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(store_io_error)?;
        fs::rename(&tmp_path, &self.path).map_err(store_io_error)?;
        Ok(())
    }

    /// Acquires the in-process lock and applies a read-modify-write
    /// closure.
    fn with_lock<R, F: FnOnce(&Self) -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        op(self)
    }
}

/// Wraps an I/O error into a [`WaitlessError::Store`].
fn store_io_error(err: std::io::Error) -> WaitlessError {
    WaitlessError::Store(Box::new(err))
}

/// Wraps a mutex poison error into a [`WaitlessError::Store`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> WaitlessError {
    WaitlessError::Store(err.to_string().into())
}

impl super::SessionStore for FileSessionStore {
    #[inline]
    fn access_token(&self) -> Result<Option<SecretString>> {
        self.with_lock(|store| Ok(store.read()?.access_token.map(SecretString::from)))
    }

    #[inline]
    fn refresh_token(&self) -> Result<Option<SecretString>> {
        self.with_lock(|store| Ok(store.read()?.refresh_token.map(SecretString::from)))
    }

    #[inline]
    fn store_tokens(&self, access: SecretString, refresh: Option<SecretString>) -> Result<()> {
        self.with_lock(|store| {
            let mut session = store.read()?;
            session.access_token = Some(access.expose_secret().to_owned());
            if let Some(token) = refresh {
                session.refresh_token = Some(token.expose_secret().to_owned());
            }
            store.write(&session)
        })
    }

    #[inline]
    fn user(&self) -> Result<Option<AdminUser>> {
        self.with_lock(|store| Ok(store.read()?.user))
    }

    #[inline]
    fn store_user(&self, user: AdminUser) -> Result<()> {
        self.with_lock(|store| {
            let mut session = store.read()?;
            session.user = Some(user);
            store.write(&session)
        })
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|store| match fs::remove_file(&store.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(store_io_error(err)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    /// Helper to create a [`FileSessionStore`] in a temporary directory.
    fn temp_store() -> (FileSessionStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join(SESSION_FILE)).unwrap();
        (store, dir)
    }

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_owned())
    }

    #[test]
    fn missing_file_reads_as_empty_session() {
        let (store, _dir) = temp_store();
        assert!(store.access_token().unwrap().is_none());
        assert!(store.user().unwrap().is_none());
    }

    #[test]
    fn tokens_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE);
        {
            let store = FileSessionStore::new(path.clone()).unwrap();
            store
                .store_tokens(secret("acc-1"), Some(secret("ref-1")))
                .unwrap();
        }
        let reopened = FileSessionStore::new(path).unwrap();
        let access = reopened.access_token().unwrap().unwrap();
        assert_eq!(access.expose_secret(), "acc-1");
        let refresh = reopened.refresh_token().unwrap().unwrap();
        assert_eq!(refresh.expose_secret(), "ref-1");
    }

    #[test]
    fn rotating_access_keeps_refresh() {
        let (store, _dir) = temp_store();
        store
            .store_tokens(secret("acc-1"), Some(secret("ref-1")))
            .unwrap();
        store.store_tokens(secret("acc-2"), None).unwrap();
        let refresh = store.refresh_token().unwrap().unwrap();
        assert_eq!(refresh.expose_secret(), "ref-1");
    }

    #[test]
    fn user_roundtrip() {
        let (store, _dir) = temp_store();
        let user = AdminUser {
            id: 7,
            name: "Dana Cole".to_owned(),
            email: "dana@example.com".to_owned(),
        };
        store.store_user(user.clone()).unwrap();
        assert_eq!(store.user().unwrap(), Some(user));
    }

    #[test]
    fn clear_removes_file() {
        let (store, _dir) = temp_store();
        store.store_tokens(secret("acc"), None).unwrap();
        store.clear().unwrap();
        assert!(store.access_token().unwrap().is_none());
        // Clearing an already-empty session is fine.
        store.clear().unwrap();
    }

    #[test]
    fn default_path_returns_path() {
        let path = FileSessionStore::default_path();
        assert!(path.is_ok());
    }
}

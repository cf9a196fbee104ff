//! Persisted client-side session state.
//!
//! The HTTP layer reads the access token on every request, swaps both
//! tokens after a successful refresh, and clears everything on logout
//! or an unrecoverable refresh failure. Backends implement the
//! [`SessionStore`] trait; the crate ships [`InMemorySessionStore`] and,
//! behind the `session-file` feature, [`FileSessionStore`].

mod memory;

#[cfg(feature = "session-file")]
mod file;

#[cfg(feature = "session-file")]
pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

use secrecy::SecretString;

use crate::error::Result;
use crate::models::AdminUser;

/// Storage backend for the persisted session (tokens plus the admin
/// user record).
///
/// All methods take `&self` — implementations use interior mutability
/// for thread-safe mutation. Methods are synchronous: session state is
/// local and cheap to read, and the HTTP layer consults it on every
/// request.
pub trait SessionStore: core::fmt::Debug + Send + Sync {
    /// Returns the current access token, if a session exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn access_token(&self) -> Result<Option<SecretString>>;

    /// Returns the current refresh token, if one was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn refresh_token(&self) -> Result<Option<SecretString>>;

    /// Stores a new access token, and a new refresh token when
    /// provided. Passing `None` for `refresh` retains the existing
    /// refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn store_tokens(&self, access: SecretString, refresh: Option<SecretString>) -> Result<()>;

    /// Returns the persisted admin user record, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read.
    fn user(&self) -> Result<Option<AdminUser>>;

    /// Stores the admin user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn store_user(&self, user: AdminUser) -> Result<()>;

    /// Removes all session state (logout, or refresh failure).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn clear(&self) -> Result<()>;
}

//! Client session state
//!
//! Single source of truth for "who is logged in and with what credentials".
//! Mutation happens only through [`SessionStore::set`] and
//! [`SessionStore::clear`]; every guarded action reads through
//! [`SessionStore::get`].

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::user::Identity;

/// The authenticated identity plus its credential tokens.
///
/// Always set or cleared as a unit; a session is never partially populated.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub identity: Identity,
    pub access_token: String,
    pub refresh_token: String,
}

/// Shared handle to the process-wide session state.
///
/// Starts empty. Cloning the store clones the handle, not the state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session atomically.
    ///
    /// Trusts the caller (the authentication workflow) completely; token
    /// contents are not inspected.
    pub fn set(&self, identity: Identity, access_token: String, refresh_token: String) {
        *self.write() = Some(Session {
            identity,
            access_token,
            refresh_token,
        });
    }

    /// Remove identity and tokens. Idempotent.
    pub fn clear(&self) {
        *self.write() = None;
    }

    /// Snapshot of the current session, or `None` when logged out. Never
    /// panics.
    pub fn get(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read().as_ref().map(|s| s.identity.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.refresh_token.clone())
    }

    // A poisoned lock only means a reader panicked mid-clone; the Option
    // itself is always valid, so recover rather than propagate.
    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

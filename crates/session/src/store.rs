//! Session store
//!
//! Single source of truth for the signed-in principal. The store keeps the
//! token, subject and role together in its backend and performs no
//! validity checks of its own.

use std::path::PathBuf;

use crate::error::SessionError;
use crate::storage::{
    Entries, FileStorage, MemoryStorage, SessionStorage, ROLE_KEY, SUBJECT_KEY, TOKEN_KEY,
};
use crate::token::decode_claims;
use crate::types::{Role, Session};

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, ROLE_KEY, SUBJECT_KEY];

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileStorage::new(path))
    }

    /// Record a freshly issued token and the role reported alongside it.
    ///
    /// The subject is read from the token payload and written with the other
    /// two entries in one storage operation. A token without a readable
    /// subject leaves the store untouched.
    pub fn set_session(&self, token: &str, role: Role) -> Result<(), SessionError> {
        let subject = decode_claims(token)?
            .subject()
            .ok_or_else(|| SessionError::MalformedToken("payload has no subject".to_string()))?;

        self.storage.store(&[
            (TOKEN_KEY, token),
            (ROLE_KEY, role.as_str()),
            (SUBJECT_KEY, subject.as_str()),
        ])?;

        tracing::debug!(subject_id = %subject, role = %role, "Session stored");
        Ok(())
    }

    /// Replace the cached subject of the current session
    pub fn set_subject(&self, subject_id: &str) -> Result<(), SessionError> {
        if subject_id.is_empty() {
            return Err(SessionError::MalformedToken("empty subject".to_string()));
        }
        if self.snapshot()?.is_none() {
            return Err(SessionError::AuthRequired);
        }

        self.storage.store(&[(SUBJECT_KEY, subject_id)])
    }

    /// Read the whole session; a partial or unreadable entry set is no session
    pub fn snapshot(&self) -> Result<Option<Session>, SessionError> {
        let entries = self.storage.load()?;
        Ok(session_from_entries(&entries))
    }

    pub fn token(&self) -> Option<String> {
        self.snapshot_or_none().map(|session| session.token)
    }

    pub fn role(&self) -> Option<Role> {
        self.snapshot_or_none().map(|session| session.role)
    }

    pub fn subject(&self) -> Option<String> {
        self.snapshot_or_none().map(|session| session.subject_id)
    }

    /// Remove all session entries. Safe to call any number of times.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove(&SESSION_KEYS)
    }

    /// Remove the session only while it still carries `token`.
    ///
    /// Returns false, leaving the store alone, when the session has since been
    /// replaced by a newer login or already cleared.
    pub fn clear_if_token(&self, token: &str) -> Result<bool, SessionError> {
        self.storage.remove_if(&SESSION_KEYS, &|entries| {
            entries.get(TOKEN_KEY).map(String::as_str) == Some(token)
        })
    }

    /// Remove leftover entries unless a complete session has been stored
    pub fn clear_if_signed_out(&self) -> Result<bool, SessionError> {
        self.storage.remove_if(&SESSION_KEYS, &|entries| {
            !entries.is_empty() && session_from_entries(entries).is_none()
        })
    }

    fn snapshot_or_none(&self) -> Option<Session> {
        self.snapshot().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Session storage unreadable, treating as signed out");
            None
        })
    }
}

fn session_from_entries(entries: &Entries) -> Option<Session> {
    let token = entries.get(TOKEN_KEY).filter(|v| !v.is_empty())?;
    let subject_id = entries.get(SUBJECT_KEY).filter(|v| !v.is_empty())?;
    let role = entries.get(ROLE_KEY)?.parse::<Role>().ok()?;

    Some(Session {
        token: token.clone(),
        subject_id: subject_id.clone(),
        role,
    })
}

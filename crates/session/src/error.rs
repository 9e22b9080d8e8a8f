//! Session errors

use thiserror::Error;

/// Session error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No usable session at the point of an authenticated call
    #[error("Authentication required")]
    AuthRequired,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Session storage error: {0}")]
    Storage(String),
}

impl SessionError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, SessionError::AuthRequired)
    }
}

//! API client errors

use faqdesk_session::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Session missing, expired, or rejected by the server. The session has
    /// already been cleared; the caller should send the user to log in.
    #[error("Authentication required")]
    AuthRequired,

    /// Non-2xx response other than 401
    #[error("{detail}")]
    Server { status: u16, detail: String },

    #[error("API request error: {0}")]
    Request(String),

    #[error("API response error: {0}")]
    Response(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(SessionError),
}

impl ApiError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, ApiError::AuthRequired)
    }

    /// HTTP status for server errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AuthRequired => ApiError::AuthRequired,
            other => ApiError::Session(other),
        }
    }
}

impl From<crate::signup::FieldError> for ApiError {
    fn from(err: crate::signup::FieldError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

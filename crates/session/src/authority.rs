//! Authenticated request authority
//!
//! Produces the header set for outbound API calls. A session that is absent
//! or expired is torn down before `AuthRequired` is returned; navigation is
//! left to the caller.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::store::SessionStore;
use crate::types::SessionState;
use crate::validator::SessionValidator;

#[derive(Debug, Clone)]
pub struct RequestAuthority {
    store: Arc<SessionStore>,
    validator: SessionValidator,
}

impl RequestAuthority {
    pub fn new(store: Arc<SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            validator: SessionValidator::new(clock),
        }
    }

    pub fn with_system_clock(store: Arc<SessionStore>) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn is_valid(&self) -> bool {
        self.validator.is_valid(&self.store)
    }

    /// Where the session currently sits in its lifecycle
    pub fn state(&self) -> SessionState {
        match self.store.token() {
            None => SessionState::NoSession,
            Some(token) if self.validator.token_is_live(&token) => {
                SessionState::AuthenticatedValid
            }
            Some(_) => SessionState::AuthenticatedExpired,
        }
    }

    /// Headers for one outbound request.
    ///
    /// Called immediately before every request and never cached, so a
    /// session that expires between calls is caught on the next one.
    pub fn auth_headers(&self) -> Result<HeaderMap, SessionError> {
        self.credentials().map(|credentials| credentials.headers)
    }

    /// Headers for one outbound request, together with the token they carry.
    ///
    /// Keep the token to hand back to [`reject`](Self::reject) if the server
    /// answers 401.
    pub fn credentials(&self) -> Result<Credentials, SessionError> {
        let token = match self.store.token() {
            Some(token) if self.validator.token_is_live(&token) => token,
            Some(token) => {
                tracing::warn!("Session token expired or unreadable");
                self.teardown(&token);
                return Err(SessionError::AuthRequired);
            }
            None => {
                tracing::debug!("No session for authenticated request");
                if let Err(e) = self.store.clear_if_signed_out() {
                    tracing::warn!(error = %e, "Failed to clear leftover session entries");
                }
                return Err(SessionError::AuthRequired);
            }
        };

        let bearer = format!("Bearer {}", token);
        let mut authorization = HeaderValue::from_str(&bearer).map_err(|_| {
            tracing::warn!("Session token is not a valid header value");
            self.teardown(&token);
            SessionError::AuthRequired
        })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!("Produced authenticated request headers");
        Ok(Credentials { token, headers })
    }

    /// React to the server rejecting `token` (401).
    ///
    /// Only the session that sent the rejected token is torn down; a session
    /// stored by a later login survives a late response.
    pub fn reject(&self, token: &str) {
        if self.teardown(token) {
            tracing::warn!("Server rejected session credentials");
        } else {
            tracing::debug!("Ignoring rejection of a superseded session");
        }
    }

    /// Explicit sign-out. Idempotent.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    fn teardown(&self, token: &str) -> bool {
        self.store.clear_if_token(token).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to clear session");
            false
        })
    }
}

/// Header set for one request and the token it was built from
pub struct Credentials {
    pub token: String,
    pub headers: HeaderMap,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("headers", &self.headers)
            .finish()
    }
}

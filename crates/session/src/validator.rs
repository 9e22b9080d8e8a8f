//! Session validity check
//!
//! Validity is recomputed from the stored token on every call; nothing
//! caches a verdict.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::store::SessionStore;
use crate::token::decode_claims;

#[derive(Clone)]
pub struct SessionValidator {
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionValidator").finish_non_exhaustive()
    }
}

impl Default for SessionValidator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl SessionValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// True iff the store holds a session whose token has not yet expired
    pub fn is_valid(&self, store: &SessionStore) -> bool {
        match store.token() {
            Some(token) => self.token_is_live(&token),
            None => false,
        }
    }

    /// True iff `now < exp * 1000`. Unreadable tokens are never live.
    pub fn token_is_live(&self, token: &str) -> bool {
        let claims = match decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Token validation failed");
                return false;
            }
        };

        match claims.expires_at_millis() {
            Some(expires_at) => (self.clock.now_millis() as f64) < expires_at,
            None => {
                tracing::debug!("Token payload has no expiry");
                false
            }
        }
    }
}

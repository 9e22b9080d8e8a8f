//! Token payload claims

use serde::Deserialize;

/// Claims carried in the payload segment of a bearer token.
///
/// Only the fields the client reads are modelled; anything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Backend-issued user identifier (string or number)
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    /// Standard subject claim, used when `user_id` is absent
    #[serde(default)]
    pub sub: Option<String>,
    /// Expires at, in seconds since the Unix epoch. Any JSON number,
    /// fractional seconds included.
    #[serde(default)]
    pub exp: Option<f64>,
}

impl TokenClaims {
    /// Identity of the signed-in principal
    pub fn subject(&self) -> Option<String> {
        let from_user_id = match &self.user_id {
            Some(serde_json::Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(serde_json::Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };

        from_user_id.or_else(|| self.sub.clone().filter(|sub| !sub.is_empty()))
    }

    /// Expiry instant in milliseconds since the Unix epoch
    pub fn expires_at_millis(&self) -> Option<f64> {
        self.exp.map(|exp| exp * 1000.0)
    }
}

//! Wire models for the FAQ backend API

use serde::{Deserialize, Serialize};

/// `POST /login` request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /login` response body
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user_type: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .finish()
    }
}

/// `POST /signup` request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub mobile: String,
    pub website: String,
    pub business_type: String,
    pub location: String,
    pub pan: String,
    pub tan: String,
}

/// `GET /subscription/status` response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionStatus {
    pub plan: String,
    pub is_trial: bool,
    pub is_active: bool,
    pub questions_used: u32,
    pub questions_allowed: u32,
    pub end_date: Option<String>,
}

impl SubscriptionStatus {
    /// Display name of the plan
    pub fn plan_label(&self) -> &str {
        if self.is_trial {
            "Trial"
        } else {
            &self.plan
        }
    }

    /// Whether the question quota leaves room for one more
    pub fn can_add_question(&self) -> bool {
        self.questions_used < self.questions_allowed
    }

    pub fn remaining_questions(&self) -> u32 {
        self.questions_allowed.saturating_sub(self.questions_used)
    }
}

/// Error body returned with non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail; validation error lists are passed through as JSON
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(serde_json::Value::String(_)) => None,
            Some(other) => Some(other.to_string()),
        }
    }
}

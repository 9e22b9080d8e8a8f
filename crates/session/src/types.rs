//! Session types

use std::str::FromStr;

use crate::error::SessionError;

/// Kind of principal signed in, as reported by the login response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Platform administrator
    Admin,
    /// Client owner (tenant account holder)
    Client,
    /// Employee of a client
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
            Role::Employee => "employee",
        }
    }

    /// Check if this role may open the admin dashboard
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "client" | "client_owner" | "client-owner" => Ok(Role::Client),
            "employee" | "client_employee" | "client-employee" => Ok(Role::Employee),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

/// The signed-in principal: all three fields exist together or not at all
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub subject_id: String,
    pub role: Role,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("subject_id", &self.subject_id)
            .field("role", &self.role)
            .finish()
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    /// The only state in which authenticated requests may succeed
    AuthenticatedValid,
    /// A session is stored but its token is expired or unreadable
    AuthenticatedExpired,
}

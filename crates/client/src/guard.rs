//! Dashboard entry guards
//!
//! Decide, from the session alone, where a caller opening a dashboard should
//! end up. Guards read the session but never modify it.

use faqdesk_session::RequestAuthority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested dashboard
    Proceed,
    /// Valid admin session opening the client dashboard
    AdminDashboard,
    /// Go to the login entry point
    Login,
}

/// Guard for the admin dashboard: valid session with the admin role
pub fn admin_entry(authority: &RequestAuthority) -> Navigation {
    if !authority.is_valid() {
        return Navigation::Login;
    }

    match authority.store().role() {
        Some(role) if role.is_admin() => Navigation::Proceed,
        _ => Navigation::Login,
    }
}

/// Guard for the client dashboard: valid session with a non-admin role
pub fn client_entry(authority: &RequestAuthority) -> Navigation {
    if !authority.is_valid() {
        return Navigation::Login;
    }

    match authority.store().role() {
        Some(role) if role.is_admin() => Navigation::AdminDashboard,
        Some(_) => Navigation::Proceed,
        None => Navigation::Login,
    }
}

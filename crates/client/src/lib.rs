//! FAQDesk API client
//!
//! HTTP glue over the FAQ backend:
//! - Login and signup flows that establish the client-side session
//! - Authenticated JSON requests routed through the session authority
//! - The multi-step signup form and its validation rules
//! - Dashboard entry guards that decide where the caller navigates

pub mod client;
pub mod error;
pub mod guard;
pub mod models;
pub mod signup;

pub use client::ApiClient;
pub use error::ApiError;
pub use guard::{admin_entry, client_entry, Navigation};
pub use models::{LoginRequest, LoginResponse, SignupRequest, SubscriptionStatus};
pub use signup::{FieldError, SignupForm, SignupStep, SignupWizard};

//! Multi-step signup form
//!
//! Three steps (account, business, compliance). Moving forward validates the
//! step being left; moving back never does. Submission revalidates every
//! step and yields the wire body for `POST /signup`.

use regex::Regex;

use crate::models::SignupRequest;

lazy_static::lazy_static! {
    /// Something@something.tld, no whitespace
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Validate an email address for the signup form
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupStep {
    Account,
    Business,
    Compliance,
}

impl SignupStep {
    pub const ALL: [SignupStep; 3] = [
        SignupStep::Account,
        SignupStep::Business,
        SignupStep::Compliance,
    ];

    pub fn index(&self) -> usize {
        match self {
            SignupStep::Account => 0,
            SignupStep::Business => 1,
            SignupStep::Compliance => 2,
        }
    }

    /// Required fields on this step as `(field, label)`
    fn required_fields(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            SignupStep::Account => &[
                ("name", "Full Name"),
                ("email", "Email"),
                ("password", "Password"),
                ("confirm_password", "Confirm Password"),
            ],
            SignupStep::Business => &[("website", "Website"), ("business_type", "Business Type")],
            SignupStep::Compliance => &[],
        }
    }
}

/// A single failed rule, naming the field to focus
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw form values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
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

impl SignupForm {
    fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "email" => &self.email,
            "password" => &self.password,
            "confirm_password" => &self.confirm_password,
            "mobile" => &self.mobile,
            "website" => &self.website,
            "business_type" => &self.business_type,
            "location" => &self.location,
            "pan" => &self.pan,
            "tan" => &self.tan,
            _ => "",
        }
    }

    /// Check the rules of one step, stopping at the first failure
    pub fn validate_step(&self, step: SignupStep) -> Result<(), FieldError> {
        for &(field, label) in step.required_fields() {
            if self.value(field).trim().is_empty() {
                return Err(FieldError::new(field, format!("Please fill in {}", label)));
            }
        }

        if step == SignupStep::Account {
            if !validate_email(&self.email) {
                return Err(FieldError::new(
                    "email",
                    "Please enter a valid email address",
                ));
            }
            if self.confirm_password != self.password {
                return Err(FieldError::new("confirm_password", "Passwords do not match"));
            }
        }

        Ok(())
    }
}

impl From<SignupForm> for SignupRequest {
    fn from(form: SignupForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
            mobile: form.mobile,
            website: form.website,
            business_type: form.business_type,
            location: form.location,
            pan: form.pan,
            tan: form.tan,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupWizard {
    form: SignupForm,
    current: usize,
}

impl SignupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: SignupForm) -> Self {
        Self { form, current: 0 }
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    pub fn step(&self) -> SignupStep {
        SignupStep::ALL[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == SignupStep::ALL.len()
    }

    /// Completion percentage shown in the progress bar
    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / SignupStep::ALL.len() as f64 * 100.0
    }

    /// Validate the current step and advance. Stays put on the last step.
    pub fn next(&mut self) -> Result<SignupStep, FieldError> {
        self.form.validate_step(self.step())?;
        if !self.is_last() {
            self.current += 1;
        }
        Ok(self.step())
    }

    /// Go back one step without validating
    pub fn previous(&mut self) -> SignupStep {
        self.current = self.current.saturating_sub(1);
        self.step()
    }

    /// Validate every step and produce the signup body.
    ///
    /// On failure the wizard moves to the first failing step.
    pub fn submit(&mut self) -> Result<SignupRequest, FieldError> {
        for step in SignupStep::ALL {
            if let Err(e) = self.form.validate_step(step) {
                self.current = step.index();
                return Err(e);
            }
        }
        Ok(self.form.clone().into())
    }
}

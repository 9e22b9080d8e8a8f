//! Shared configuration and error handling for the FAQDesk client
//!
//! This crate provides common functionality used across the FAQDesk crates:
//! - Configuration management following 12-factor principles
//! - Configuration error types

pub mod config;
pub mod error;

pub use config::ClientConfig;
pub use error::{ConfigError, Result};

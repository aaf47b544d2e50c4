//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Decimal money helpers (`MoneyMath`)
//! - Typed IDs for type-safe entity references
//! - Application-wide error types and field-keyed validation messages
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult, FieldErrors};
pub use types::MoneyMath;

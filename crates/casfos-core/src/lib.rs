//! CASFOS Core Library
//!
//! This crate provides the shared domain models, error types, configuration,
//! diff engine, and validation used across all CASFOS workflow components.

pub mod config;
pub mod diff;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use diff::{diff_records, RecordDiff};
pub use error::{AppError, ErrorMetadata, LogLevel};

//! Shared types, errors, and configuration for Bankroll.
//!
//! This crate provides common types used across all other crates:
//! - The error taxonomy (stable internal codes and their status classes)
//! - Typed IDs for type-safe entity references
//! - Limit/offset paging
//! - Configuration management

pub mod config;
pub mod error;
pub mod status;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorCode};
pub use status::StatusClass;

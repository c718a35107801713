//! Core business logic for Bankroll.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Requests arrive as [`intent::Intent`]s and leave as [`outcome::Outcome`]s or
//! taxonomy errors.
//!
//! # Modules
//!
//! - `validation` - MOD-11 checksum and declarative field rules
//! - `intent` - Request normalization
//! - `outcome` - Operation results
//! - `customer` - Customer orchestration
//! - `bank_account` - Bank account orchestration and the preferred-account invariant

pub mod bank_account;
pub mod customer;
pub mod intent;
pub mod outcome;
pub mod repository;
pub mod validation;

#[cfg(test)]
mod memory;

pub use intent::{CrudOperation, EntityKind, Intent, normalize};
pub use outcome::{Outcome, OutcomePayload};
pub use repository::RepositoryError;

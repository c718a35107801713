//! Repository implementations for data access.
//!
//! Repositories implement the persistence traits declared in `bankroll-core`,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod bank_account;
pub mod customer;

pub use bank_account::BankAccountRepository;
pub use customer::CustomerRepository;

use bankroll_core::RepositoryError;
use sea_orm::{DbErr, SqlErr};

/// Classifies a `SeaORM` error, keeping unique violations distinguishable.
pub(crate) fn repository_error(err: &DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::UniqueViolation(detail),
        _ => RepositoryError::database(err.to_string()),
    }
}

/// Narrows a domain id to the storage key width.
///
/// Ids outside the key range cannot exist in storage.
pub(crate) fn storage_key(id: i64) -> Option<i32> {
    i32::try_from(id).ok()
}

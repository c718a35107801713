//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository implementations of the `bankroll-core` persistence traits
//! - The schema migration

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{BankAccountRepository, CustomerRepository};

use bankroll_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::migration::Migrator;

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);

    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening database pool"
    );
    Database::connect(options).await
}

/// Applies every pending migration.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

//! Shared setup for repository tests.

use bankroll_db::{connect, migrate};
use bankroll_shared::config::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Opens a fresh in-memory SQLite database with the schema applied.
///
/// The pool holds a single connection, since every SQLite memory connection is
/// its own database.
pub async fn test_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        run_migrations: true,
    };
    let db = connect(&config).await.expect("Failed to connect to database");
    migrate(&db).await.expect("Failed to apply migrations");
    db
}

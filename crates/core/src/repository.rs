//! Errors shared by the repository traits.

use thiserror::Error;

/// Storage failure as reported by a repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other storage failure.
    #[error("database error: {0}")]
    Database(String),
}

impl RepositoryError {
    /// Create a database error.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Returns true for a unique constraint violation.
    #[must_use]
    pub const fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }
}

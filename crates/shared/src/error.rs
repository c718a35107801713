//! Application-wide error taxonomy.
//!
//! Every failure that can leave the core is an [`AppError`] tagged with an
//! [`ErrorCode`]. The code is the single source of truth for the status class a
//! failure maps to; callers never pick a status themselves.

use std::fmt;

use thiserror::Error;

use crate::status::StatusClass;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Boxed lower-layer cause kept behind a taxonomy error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable internal error codes.
///
/// The numeric values are part of the public contract and must not be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Request body, paging value, or route segment could not be parsed.
    MalformedRequest,
    /// No route matches the request.
    RouteNotFound,
    /// Payload failed field validation.
    ValidationFailed,
    /// Referenced customer does not exist.
    CustomerNotFound,
    /// Referenced bank account does not exist.
    BankAccountNotFound,
    /// Storage rejected or failed an operation.
    Database,
    /// Unclassified failure.
    Unknown,
    /// A unique value is already taken.
    DuplicateValue,
    /// The customer already has a preferred bank account.
    PreferredAlreadySet,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: [Self; 9] = [
        Self::MalformedRequest,
        Self::RouteNotFound,
        Self::ValidationFailed,
        Self::CustomerNotFound,
        Self::BankAccountNotFound,
        Self::Database,
        Self::Unknown,
        Self::DuplicateValue,
        Self::PreferredAlreadySet,
    ];

    /// Returns the stable numeric identifier.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::MalformedRequest => 1,
            Self::RouteNotFound => 2,
            Self::ValidationFailed => 3,
            Self::CustomerNotFound => 4,
            Self::BankAccountNotFound => 5,
            Self::Database => 6,
            Self::Unknown => 7,
            Self::DuplicateValue => 8,
            Self::PreferredAlreadySet => 9,
        }
    }

    /// Returns the status class this code is reported with.
    #[must_use]
    pub const fn status_class(self) -> StatusClass {
        match self {
            Self::MalformedRequest => StatusClass::BadRequest,
            Self::RouteNotFound | Self::CustomerNotFound | Self::BankAccountNotFound => {
                StatusClass::NotFound
            }
            Self::ValidationFailed
            | Self::Database
            | Self::Unknown
            | Self::DuplicateValue
            | Self::PreferredAlreadySet => StatusClass::Unprocessable,
        }
    }

    /// Returns the symbolic name, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MalformedRequest => "MALFORMED_REQUEST",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::BankAccountNotFound => "BANK_ACCOUNT_NOT_FOUND",
            Self::Database => "DATABASE_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
            Self::DuplicateValue => "DUPLICATE_VALUE",
            Self::PreferredAlreadySet => "PREFERRED_ALREADY_SET",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// A classified failure: stable code, human message, optional hidden cause.
///
/// Displays as `<message> (Error code: <N>)`.
#[derive(Debug, Error)]
#[error("{message} (Error code: {code})")]
pub struct AppError {
    code: ErrorCode,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl AppError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches the lower-layer cause. It is kept for logging but never rendered.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Create a malformed request error.
    #[must_use]
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedRequest, message)
    }

    /// Create a route not found error.
    #[must_use]
    pub fn route_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RouteNotFound, message)
    }

    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Create a customer not found error.
    #[must_use]
    pub fn customer_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CustomerNotFound, message)
    }

    /// Create a bank account not found error.
    #[must_use]
    pub fn bank_account_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BankAccountNotFound, message)
    }

    /// Create a database error.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Database, message)
    }

    /// Create an unknown error.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }

    /// Create a duplicate value error.
    #[must_use]
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateValue, message)
    }

    /// Create a preferred-already-set error.
    #[must_use]
    pub fn preferred_already_set(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PreferredAlreadySet, message)
    }

    /// Returns the taxonomy code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the cause text without the code suffix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the status class, derived from the code.
    #[must_use]
    pub const fn status_class(&self) -> StatusClass {
        self.code.status_class()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

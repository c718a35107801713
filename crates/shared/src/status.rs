//! Transport-agnostic result classes.

/// Result class of an operation, shared by successful outcomes and taxonomy errors.
///
/// Only the transport boundary turns a class into a wire status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// Read succeeded.
    Ok,
    /// Entity was created.
    Created,
    /// Mutation succeeded, nothing to return.
    NoContent,
    /// The request could not be understood.
    BadRequest,
    /// The addressed resource does not exist.
    NotFound,
    /// The request was understood but rejected.
    Unprocessable,
}

impl StatusClass {
    /// Returns the HTTP status code for this class.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Unprocessable => 422,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status() {
        assert_eq!(StatusClass::Ok.http_status(), 200);
        assert_eq!(StatusClass::Created.http_status(), 201);
        assert_eq!(StatusClass::NoContent.http_status(), 204);
        assert_eq!(StatusClass::BadRequest.http_status(), 400);
        assert_eq!(StatusClass::NotFound.http_status(), 404);
        assert_eq!(StatusClass::Unprocessable.http_status(), 422);
    }
}

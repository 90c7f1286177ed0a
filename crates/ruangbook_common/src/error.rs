// --- File: crates/ruangbook_common/src/error.rs ---
use serde::Serialize;
use thiserror::Error;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// The base error type for all RuangBook errors.
///
/// Each crate keeps its own error enum and implements `From<SpecificError>` for
/// `RuangbookError`, so handlers can return this type and get a uniform JSON body.
#[derive(Error, Debug)]
pub enum RuangbookError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Missing or invalid credentials
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Valid credentials without the required role
    #[error("Forbidden: {0}")]
    ForbiddenError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// One or more form fields were rejected
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(Vec<FieldError>),

    /// The request is well formed but a booking rule forbids it
    #[error("{0}")]
    RuleViolation(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("{0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RuangbookError {
    /// Field level details, only present for form validation failures.
    pub fn fields(&self) -> Option<&[FieldError]> {
        match self {
            RuangbookError::FieldValidation(fields) => Some(fields),
            _ => None,
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RuangbookError {
    fn status_code(&self) -> u16 {
        match self {
            RuangbookError::ParseError(_) => 400,
            RuangbookError::ConfigError(_) => 500,
            RuangbookError::AuthError(_) => 401,
            RuangbookError::ForbiddenError(_) => 403,
            RuangbookError::ValidationError(_) => 400,
            RuangbookError::FieldValidation(_) => 400,
            RuangbookError::RuleViolation(_) => 422,
            RuangbookError::DatabaseError(_) => 500,
            RuangbookError::ConflictError(_) => 409,
            RuangbookError::NotFoundError(_) => 404,
            RuangbookError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<serde_json::Error> for RuangbookError {
    fn from(err: serde_json::Error) -> Self {
        RuangbookError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for RuangbookError {
    fn from(err: std::io::Error) -> Self {
        RuangbookError::InternalError(err.to_string())
    }
}

impl From<crate::services::BoxedError> for RuangbookError {
    fn from(err: crate::services::BoxedError) -> Self {
        RuangbookError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(RuangbookError::ConflictError("x".into()).status_code(), 409);
        assert_eq!(RuangbookError::NotFoundError("x".into()).status_code(), 404);
        assert_eq!(RuangbookError::AuthError("x".into()).status_code(), 401);
        assert_eq!(RuangbookError::ForbiddenError("x".into()).status_code(), 403);
        assert_eq!(RuangbookError::RuleViolation("x".into()).status_code(), 422);
        assert_eq!(
            RuangbookError::FieldValidation(vec![FieldError::new("a", "b")]).status_code(),
            400
        );
    }

    #[test]
    fn conflict_message_is_shown_verbatim() {
        let err = RuangbookError::ConflictError("Ruang sudah dibooking pada jam tersebut".into());
        assert_eq!(err.to_string(), "Ruang sudah dibooking pada jam tersebut");
    }
}

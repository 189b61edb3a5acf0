//! Domain-level error types.

use thiserror::Error;
use validator::ValidationErrors;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: i32) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Foreign key violation: {0}")]
    Reference(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(_) => {
                DomainError::Duplicate("username or email already exists".to_string())
            }
            RepoError::NotFound => DomainError::Internal("row vanished during write".to_string()),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(msg) => DomainError::Internal(msg),
            other => DomainError::Unauthorized(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{field}: {msg}"),
                    None => format!("{field}: invalid value"),
                })
            })
            .collect();
        messages.sort();
        DomainError::Validation(messages.join(", "))
    }
}

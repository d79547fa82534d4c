//! # Service Outcomes and the Transport Mapping
//!
//! The integrity services resolve every business rule themselves and
//! return one of the tagged outcomes below. The transport's only job is
//! the `IntoResponse` impl at the bottom: outcome kind → status code,
//! message → plain-text body. It never re-interprets business meaning.
//!
//! ## Taxonomy
//! ```text
//! Validation  400   malformed/missing/out-of-range field, id mismatch
//! Conflict    400   duplicate natural key, referential/dependency rule
//! NotFound    404   operation targets a nonexistent id
//! Store       500   infrastructure failure (except unique violations,
//!                   which the From<DbError> impl re-tags as Conflict -
//!                   the commit-time backstop for the uniqueness race)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use storefront_db::DbError;

/// Tagged outcome of an integrity-service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field rules rejected the record, or the body id does not match
    /// the path id. Recoverable by resubmitting corrected input.
    #[error("{0}")]
    Validation(String),

    /// Duplicate natural key or a referential/dependency rule refused
    /// the operation.
    #[error("{0}")]
    Conflict(String),

    /// The target id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// The store itself failed; the caller's input was fine.
    #[error("storage error: {0}")]
    Store(DbError),
}

/// Result type for integrity-service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl ToString) -> Self {
        ServiceError::Validation(message.to_string())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }

    fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            // Unique-constraint backstop: a concurrent request won the
            // check-then-act race; report it like the application check.
            DbError::UniqueViolation { constraint } => ServiceError::Conflict(format!(
                "a record with the same {constraint} already exists"
            )),
            other => ServiceError::Store(other),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed with a storage error");
        }
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_outcome_kind() {
        assert_eq!(
            ServiceError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::conflict("dup").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::not_found("category", 1).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Store(DbError::PoolExhausted).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err: ServiceError = DbError::UniqueViolation {
            constraint: "products.name".into(),
        }
        .into();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn not_found_message() {
        let err = ServiceError::not_found("sale", 7);
        assert_eq!(err.to_string(), "sale not found: 7");
    }
}

//! Error normalization for the HTTP surface
//!
//! Every failure on the request path ends up here as an [`ApiError`], which
//! classifies the underlying [`rlp_common::Error`] into one of five kinds and
//! renders the uniform error envelope. Classification order:
//!
//! 1. explicit not-found
//! 2. duplicate key / unique constraint violation
//! 3. field validation failure
//! 4. generic store failure
//! 5. anything else (internal)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rlp_common::{Error, ValidationErrors};
use serde_json::{json, Value};

use crate::api::envelope::{ErrorBody, ErrorEnvelope};

/// Substrings that identify a uniqueness violation in driver error text
/// (SQLite, MySQL/MariaDB, PostgreSQL)
const UNIQUE_VIOLATION_MARKERS: [&str; 3] = [
    "UNIQUE constraint failed",
    "Duplicate entry",
    "duplicate key value",
];

pub const CONFLICT_MESSAGE: &str = "Recipe with this name and job already exists";

/// Classified error kind; fixes status code and envelope `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Store,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Store | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Validation => "validation_error",
            ErrorKind::Store => "database_error",
            ErrorKind::Internal => "internal_error",
        }
    }
}

fn has_unique_marker(text: &str) -> bool {
    UNIQUE_VIOLATION_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}

/// True if a driver error reports a unique constraint violation
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() || has_unique_marker(db_err.message())
        }
        other => has_unique_marker(&other.to_string()),
    }
}

fn is_duplicate(error: &Error) -> bool {
    match error {
        Error::Conflict(_) => true,
        Error::Database(db_err) => is_unique_violation(db_err),
        Error::Store(text) | Error::Internal(text) => has_unique_marker(text),
        _ => false,
    }
}

/// Map an error onto its kind, checking conditions in priority order
pub fn classify(error: &Error) -> ErrorKind {
    if matches!(
        error,
        Error::NotFound(_) | Error::Database(sqlx::Error::RowNotFound)
    ) {
        return ErrorKind::NotFound;
    }
    if is_duplicate(error) {
        return ErrorKind::Conflict;
    }
    match error {
        Error::Validation(_) => ErrorKind::Validation,
        Error::Database(_) | Error::Store(_) => ErrorKind::Store,
        _ => ErrorKind::Internal,
    }
}

/// Record of a rendered error, left in the response extensions so the
/// request middleware can log it once with request correlation
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub detail: String,
}

/// A classified failure ready to be rendered as an error envelope
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    error: Error,
}

impl ApiError {
    pub fn new(error: Error) -> Self {
        Self {
            kind: classify(&error),
            error,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(Error::NotFound(what.into()))
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(Error::Internal(detail.into()))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Client-facing message
    pub fn message(&self) -> String {
        match (&self.kind, &self.error) {
            (ErrorKind::NotFound, Error::NotFound(what)) => what.clone(),
            (ErrorKind::NotFound, _) => "Resource not found".to_string(),
            (ErrorKind::Conflict, Error::Conflict(what)) => what.clone(),
            (ErrorKind::Conflict, _) => CONFLICT_MESSAGE.to_string(),
            (ErrorKind::Validation, _) => "Invalid parameter value".to_string(),
            (ErrorKind::Store, _) => "Database error occurred".to_string(),
            (ErrorKind::Internal, _) => "An unexpected error occurred".to_string(),
        }
    }

    /// Envelope `details`: field errors for validation, raw text for store
    /// failures, nothing otherwise
    pub fn details(&self) -> Option<Value> {
        match (&self.kind, &self.error) {
            (ErrorKind::Validation, Error::Validation(errors)) => {
                Some(json!({ "errors": errors }))
            }
            (ErrorKind::Store, Error::Store(text)) => Some(json!({ "error": text })),
            (ErrorKind::Store, Error::Database(db_err)) => {
                Some(json!({ "error": db_err.to_string() }))
            }
            _ => None,
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self::new(error)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::new(Error::Validation(errors))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        Self::new(Error::Database(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        let body = ErrorEnvelope::new(ErrorBody {
            code: status.as_u16(),
            message: self.message(),
            error_type: self.kind.type_name(),
            details: self.details(),
        });

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorReport {
            kind: self.kind,
            detail: self.error.to_string(),
        });
        response
    }
}

/// Render a caught handler panic as an `internal_error` envelope
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = panic.downcast_ref::<&str>() {
        text.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::internal(format!("Handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlp_common::FieldErrorKind;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorKind::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorKind::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Store.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorKind::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(classify(&Error::NotFound("Recipe 1 not found".into())), ErrorKind::NotFound);
        assert_eq!(classify(&Error::Database(sqlx::Error::RowNotFound)), ErrorKind::NotFound);
        assert_eq!(classify(&Error::Conflict(CONFLICT_MESSAGE.into())), ErrorKind::Conflict);

        let invalid = ValidationErrors::single("stars", "must be between 0 and 5", FieldErrorKind::Range);
        assert_eq!(classify(&Error::Validation(invalid)), ErrorKind::Validation);

        assert_eq!(classify(&Error::Store("connection reset".into())), ErrorKind::Store);
        assert_eq!(classify(&Error::Database(sqlx::Error::PoolTimedOut)), ErrorKind::Store);
        assert_eq!(classify(&Error::Config("bad".into())), ErrorKind::Internal);
        assert_eq!(classify(&Error::Internal("boom".into())), ErrorKind::Internal);
    }

    #[test]
    fn test_duplicate_detected_from_error_text() {
        let store = Error::Store(
            "Failed to create recipe: (1062, \"Duplicate entry 'Iron Ingot-BSM' for key 'uq'\")".into(),
        );
        assert_eq!(classify(&store), ErrorKind::Conflict);

        let sqlite = Error::Store("UNIQUE constraint failed: recipes.name, recipes.job".into());
        assert_eq!(classify(&sqlite), ErrorKind::Conflict);

        let internal = Error::Internal("duplicate key value violates unique constraint".into());
        assert_eq!(classify(&internal), ErrorKind::Conflict);
    }

    #[test]
    fn test_messages_and_details() {
        let err = ApiError::from(ValidationErrors::single("job", "must be one of ...", FieldErrorKind::Enum));
        assert_eq!(err.message(), "Invalid parameter value");
        let details = err.details().unwrap();
        assert_eq!(details["errors"][0]["field"], "job");
        assert_eq!(details["errors"][0]["kind"], "enum");

        let err = ApiError::new(Error::Store("disk full".into()));
        assert_eq!(err.message(), "Database error occurred");
        assert_eq!(err.details().unwrap()["error"], "disk full");

        let err = ApiError::internal("secret stack trace");
        assert_eq!(err.message(), "An unexpected error occurred");
        assert!(err.details().is_none());

        let err = ApiError::not_found("Recipe 9 not found");
        assert_eq!(err.message(), "Recipe 9 not found");
    }

    #[test]
    fn test_into_response_leaves_report() {
        let response = ApiError::not_found("Recipe 3 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.kind, ErrorKind::NotFound);
        assert!(report.detail.contains("Recipe 3"));
    }

    #[test]
    fn test_panic_payload_becomes_internal_error() {
        let response = panic_response(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.kind, ErrorKind::Internal);
        assert!(report.detail.contains("index out of bounds"));
    }
}

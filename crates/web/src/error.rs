use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use importer::ImporterError;
use serde_json::json;
use std::fmt;
use storage::{dto::character::DeltaValidationError, error::StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Importer(ImporterError),
    Validation(ValidationErrors),
    Deltas(DeltaValidationError),
    BadRequest(String),
    BadGateway(String),
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Importer(e) => write!(f, "Import error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Deltas(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::Importer(ImporterError::StorageError(e)) => Self::Storage(e).into_response(),
            other => {
                let (status_code, body) = other.status_and_body();
                (status_code, Json(body)).into_response()
            }
        }
    }
}

impl WebError {
    fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self {
            Self::Storage(StorageError::NotFound) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Resource not found"
                }),
            ),
            Self::Storage(StorageError::ConstraintViolation(msg)) => (
                StatusCode::CONFLICT,
                json!({
                    "error": msg
                }),
            ),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An internal error occurred"
                    }),
                )
            }
            Self::Importer(e) => {
                tracing::error!("Roster import error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An internal error occurred"
                    }),
                )
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Validation failed",
                        "details": field_errors
                    }),
                )
            }
            Self::Deltas(e) => {
                let body = match e {
                    DeltaValidationError::InvalidFields(fields) => json!({
                        "error": "Invalid fields in request body",
                        "invalid_fields": fields
                    }),
                    DeltaValidationError::MissingFields(fields) => json!({
                        "error": "Missing required fields",
                        "missing_fields": fields
                    }),
                    DeltaValidationError::NonNumericFields(fields) => json!({
                        "error": "Fields must be integers",
                        "non_numeric_fields": fields
                    }),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": msg
                }),
            ),
            Self::BadGateway(msg) => {
                tracing::warn!("Upstream failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Failed to fetch upstream resource"
                    }),
                )
            }
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An internal error occurred"
                    }),
                )
            }
        }
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ImporterError> for WebError {
    fn from(error: ImporterError) -> Self {
        Self::Importer(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<DeltaValidationError> for WebError {
    fn from(error: DeltaValidationError) -> Self {
        Self::Deltas(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WebError::Storage(StorageError::NotFound), StatusCode::NOT_FOUND),
            (
                WebError::Storage(StorageError::ConstraintViolation("wins".into())),
                StatusCode::CONFLICT,
            ),
            (
                WebError::Storage(StorageError::Database(sqlx::Error::PoolClosed)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                WebError::Importer(ImporterError::Selector("tr".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                WebError::Deltas(DeltaValidationError::MissingFields(vec!["elo_change".into()])),
                StatusCode::BAD_REQUEST,
            ),
            (WebError::BadGateway("timeout".into()), StatusCode::BAD_GATEWAY),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_importer_storage_errors_keep_their_status() {
        let error = WebError::Importer(ImporterError::StorageError(StorageError::NotFound));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let (_, body) =
            WebError::Storage(StorageError::Database(sqlx::Error::PoolClosed)).status_and_body();
        assert_eq!(body, json!({ "error": "An internal error occurred" }));
    }
}

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prodrank_core::error::CoreError;
use prodrank_core::types::DbId;
use serde::Serialize;

/// Error type returned by every HTTP handler.
///
/// Domain failures arrive as [`CoreError`], persistence failures as
/// [`sqlx::Error`]. Both render as `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request could not be decoded (malformed JSON, wrong field types).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Shorthand for a `NotFound` error on `entity`.
pub fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.classify();
        (status, axum::Json(ErrorBody { error, code })).into_response()
    }
}

/// Human-readable message for a known unique constraint.
fn conflict_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "uq_attributes_comparison_name" => {
            Some("An attribute with this name already exists in the comparison")
        }
        "uq_products_comparison_name" => {
            Some("A product with this name already exists in the comparison")
        }
        "uq_product_attribute_values_product_attribute" => {
            Some("The product already has a value for this attribute")
        }
        _ => None,
    }
}

/// Map a sqlx error to status, code, and client-safe message.
///
/// - `RowNotFound` and foreign-key violations (parent removed mid-request)
///   map to 404.
/// - Unique violations on a `uq_` constraint map to 409.
/// - Anything else is logged and reported as an opaque 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found".to_string());
    }

    if let sqlx::Error::Database(db_err) = err {
        match db_err.code().as_deref() {
            Some("23505") => {
                if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                    let message = conflict_message(constraint)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Duplicate value violates {constraint}"));
                    return (StatusCode::CONFLICT, "CONFLICT", message);
                }
            }
            Some("23503") => {
                return (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Referenced resource not found".to_string(),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", INTERNAL_MESSAGE.to_string())
}

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::{Json, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error as ThisError;
use tracing::{error, warn};

#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("Invalid or missing API Key")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(SqlxError),
}

impl From<SqlxError> for AppError {
    fn from(e: SqlxError) -> Self {
        match e {
            // Anything sqlite classifies (check / not null / unique / fk) slipped past validation.
            SqlxError::Database(db) if !matches!(db.kind(), ErrorKind::Other) => {
                AppError::Constraint(db.message().to_string())
            }
            other => AppError::Database(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match &self {
            AppError::Unauthorized => {
                let body = ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: self.to_string(),
                };
                let mut resp =
                    (StatusCode::UNAUTHORIZED, Json(ApiErrorResponse { error: body }))
                        .into_response();
                resp.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("API key"),
                );
                return resp;
            }
            AppError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".to_string(),
                    message: self.to_string(),
                },
            ),
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: self.to_string(),
                },
            ),
            AppError::Constraint(msg) => {
                warn!(error = %msg, "storage rejected write");
                (
                    StatusCode::CONFLICT,
                    ApiErrorBody {
                        code: "CONSTRAINT_VIOLATION".to_string(),
                        message: self.to_string(),
                    },
                )
            }
            AppError::Database(e) => {
                error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

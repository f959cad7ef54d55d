//! Error types for WildTrack server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Machine-distinguishable error kinds exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorKind {
    InternalError = 1,
    StorageError = 3,
    ValidationError = 18,
    DuplicateEmail = 19,
    DuplicateAccessionNumber = 20,
    DuplicateIsbn = 21,
    BookNotFound = 22,
    SessionNotFound = 23,
    ConcurrentModification = 24,
    InvalidCredentials = 25,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InternalError => "InternalError",
            ErrorKind::StorageError => "StorageError",
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::DuplicateEmail => "DuplicateEmail",
            ErrorKind::DuplicateAccessionNumber => "DuplicateAccessionNumber",
            ErrorKind::DuplicateIsbn => "DuplicateIsbn",
            ErrorKind::BookNotFound => "BookNotFound",
            ErrorKind::SessionNotFound => "SessionNotFound",
            ErrorKind::ConcurrentModification => "ConcurrentModification",
            ErrorKind::InvalidCredentials => "InvalidCredentials",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Accession number already exists: {0}")]
    DuplicateAccessionNumber(String),

    #[error("ISBN already exists: {0}")]
    DuplicateIsbn(String),

    #[error("Book with id {0} not found")]
    BookNotFound(i32),

    #[error("Library hours session with id {0} not found")]
    SessionNotFound(i32),

    #[error("Library hours session {0} was modified concurrently")]
    ConcurrentModification(i32),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::ValidationError,
            AppError::DuplicateEmail(_) => ErrorKind::DuplicateEmail,
            AppError::DuplicateAccessionNumber(_) => ErrorKind::DuplicateAccessionNumber,
            AppError::DuplicateIsbn(_) => ErrorKind::DuplicateIsbn,
            AppError::BookNotFound(_) => ErrorKind::BookNotFound,
            AppError::SessionNotFound(_) => ErrorKind::SessionNotFound,
            AppError::ConcurrentModification(_) => ErrorKind::ConcurrentModification,
            AppError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AppError::Database(_) => ErrorKind::StorageError,
            AppError::Internal(_) => ErrorKind::InternalError,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::DuplicateEmail(_)
            | AppError::DuplicateAccessionNumber(_)
            | AppError::DuplicateIsbn(_)
            | AppError::ConcurrentModification(_) => (StatusCode::CONFLICT, self.to_string()),
            AppError::BookNotFound(_) | AppError::SessionNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: kind as u32,
            error: kind.as_str().to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

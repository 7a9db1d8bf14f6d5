//! Users Error Types
//!
//! This module provides user-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

/// Users-specific result type alias
pub type UsersResult<T> = Result<T, UsersError>;

/// Users-specific error variants
#[derive(Debug, Error)]
pub enum UsersError {
    /// User not found
    #[error("User not found")]
    NotFound,

    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// The follow relation already exists
    #[error("Already following this user")]
    AlreadyFollowing,

    /// The follower named in the payload does not exist
    #[error("Follower does not exist")]
    UnknownFollower,

    /// Payload rejected by domain validation
    #[error("Invalid user: {0}")]
    Validation(String),

    /// Store round trip exceeded the query timeout
    #[error("Database query timed out")]
    Timeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UsersError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            UsersError::NotFound => ErrorKind::NotFound,
            UsersError::UserNameTaken | UsersError::EmailTaken | UsersError::AlreadyFollowing => {
                ErrorKind::Conflict
            }
            UsersError::UnknownFollower => ErrorKind::UnprocessableEntity,
            UsersError::Validation(_) => ErrorKind::BadRequest,
            UsersError::Timeout => ErrorKind::ServiceUnavailable,
            UsersError::Database(e) => classify_sqlx(e).0,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            UsersError::NotFound => AppError::not_found("User not found"),
            UsersError::UserNameTaken => AppError::conflict("User name already exists")
                .with_action("Choose a different user name"),
            UsersError::EmailTaken => AppError::conflict("Email already registered"),
            UsersError::AlreadyFollowing => AppError::conflict("Already following this user"),
            UsersError::UnknownFollower => AppError::unprocessable("Follower does not exist"),
            UsersError::Validation(msg) => AppError::bad_request(msg),
            UsersError::Timeout => AppError::service_unavailable("Database query timed out"),
            UsersError::Database(e) => AppError::from(e),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            UsersError::Database(e) => {
                tracing::error!(error = %e, "Users database error");
            }
            UsersError::Timeout => {
                tracing::error!("Users database query timed out");
            }
            UsersError::UserNameTaken | UsersError::EmailTaken => {
                tracing::warn!(error = %self, "User registration conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Users error");
            }
        }
    }
}

impl From<UsersError> for AppError {
    fn from(err: UsersError) -> Self {
        err.into_app_error()
    }
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

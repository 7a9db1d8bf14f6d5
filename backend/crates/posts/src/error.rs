//! Posts Error Types
//!
//! This module provides post-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use kernel::id::PostId;
use thiserror::Error;

/// Posts-specific result type alias
pub type PostsResult<T> = Result<T, PostsError>;

/// Posts-specific error variants
#[derive(Debug, Error)]
pub enum PostsError {
    /// Post does not exist (never created, or deleted)
    #[error("Post not found")]
    NotFound,

    /// Conditional write matched no row although the post exists:
    /// someone else updated it after the caller's read
    #[error("Post {post_id} was modified concurrently (expected version {expected_version})")]
    StaleVersion {
        post_id: PostId,
        expected_version: i32,
    },

    /// Payload rejected by domain validation
    #[error("Invalid post: {0}")]
    Validation(String),

    /// Store round trip exceeded the query timeout
    #[error("Database query timed out")]
    Timeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PostsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostsError::NotFound => ErrorKind::NotFound,
            PostsError::StaleVersion { .. } => ErrorKind::Conflict,
            PostsError::Validation(_) => ErrorKind::BadRequest,
            PostsError::Timeout => ErrorKind::ServiceUnavailable,
            PostsError::Database(e) => classify_sqlx(e).0,
        }
    }

    /// Whether the client should re-read and retry
    pub fn is_retryable_conflict(&self) -> bool {
        matches!(self, PostsError::StaleVersion { .. })
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            PostsError::NotFound => AppError::not_found("Post not found"),
            PostsError::StaleVersion { .. } => {
                AppError::conflict("Post was modified by another request")
                    .with_action("Fetch the post again and retry with its current version")
            }
            PostsError::Validation(msg) => AppError::bad_request(msg),
            PostsError::Timeout => AppError::service_unavailable("Database query timed out"),
            PostsError::Database(e) => AppError::from(e),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PostsError::Database(e) => {
                tracing::error!(error = %e, "Posts database error");
            }
            PostsError::Timeout => {
                tracing::error!("Posts database query timed out");
            }
            PostsError::StaleVersion {
                post_id,
                expected_version,
            } => {
                tracing::warn!(
                    post_id = %post_id,
                    expected_version = expected_version,
                    "Stale post update rejected"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Posts error");
            }
        }
    }
}

impl From<PostsError> for AppError {
    fn from(err: PostsError) -> Self {
        err.into_app_error()
    }
}

impl IntoResponse for PostsError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

//! Error types for realnews
//!
//! This module provides the error handling used across the service:
//! - Domain errors for the backend collaborators (document store, auth, blob storage)
//! - HTTP status code mapping for the REST API
//! - Structured error responses with machine-readable error codes
//! - User-facing messages that never leak backend internals

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for realnews operations
pub type Result<T> = std::result::Result<T, Error>;

/// Generic message shown to readers and admins when an operation fails for a
/// reason they cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Backend resource guarded by write rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// The `posts` collection
    Posts,
    /// The `ads` collection (banner configuration)
    Ads,
    /// Image blob storage
    Storage,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Posts => write!(f, "posts"),
            Resource::Ads => write!(f, "ads"),
            Resource::Storage => write!(f, "storage"),
        }
    }
}

/// Main error type for realnews
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "feed.home_limit")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Generic failure reaching or talking to a backend collaborator
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend refused a query because a required index or configuration
    /// is missing. The feed loader recovers from this locally.
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),

    /// A write was rejected by the backend's authorization rules
    #[error("permission denied: you cannot write to {resource}")]
    PermissionDenied {
        /// The resource the write targeted
        resource: Resource,
    },

    /// No signed-in admin, or the credentials were rejected
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The image upload did not complete within the client-side deadline
    #[error("upload timed out after {secs} seconds")]
    UploadTimeout {
        /// Deadline that was exceeded, in seconds
        secs: u64,
    },

    /// Invalid form input
    #[error("validation error: {0}")]
    Validation(String),

    /// Document not found
    #[error("not found: {0}")]
    NotFound(String),

    /// A feed could not be loaded; the message is suitable for readers
    #[error("{0}")]
    FeedUnavailable(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl Error {
    /// Message safe to show to an end user.
    ///
    /// Server-side failures collapse to [`GENERIC_FAILURE_MESSAGE`]; errors the
    /// user can act on keep a specific message.
    pub fn public_message(&self) -> String {
        match self {
            Error::PermissionDenied {
                resource: Resource::Storage,
            } => "Permission denied: You cannot upload images to Storage.".to_string(),
            Error::PermissionDenied {
                resource: Resource::Posts,
            } => "Permission denied: You cannot upload news to the posts collection.".to_string(),
            Error::PermissionDenied {
                resource: Resource::Ads,
            } => "Permission denied: You cannot change the advertisement settings.".to_string(),
            Error::UploadTimeout { secs } => format!(
                "Upload timed out after {} seconds. Check your connection or storage permissions.",
                secs
            ),
            Error::Unauthorized(msg)
            | Error::Validation(msg)
            | Error::FeedUnavailable(msg) => msg.clone(),
            Error::NotFound(what) => format!("{} not found", what),
            Error::Config { message, .. } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "permission_denied",
///     "message": "Permission denied: You cannot upload images to Storage.",
///     "details": { "resource": "storage" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "not_found", "validation_error")
    pub code: String,

    /// Human-readable error message, suitable for display
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an "unauthorized" error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("unauthorized", message)
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            Error::Config { .. } => 400,
            Error::Validation(_) => 400,
            Error::Unauthorized(_) => 401,
            Error::PermissionDenied { .. } => 403,
            Error::NotFound(_) => 404,

            Error::Database(_) => 500,
            Error::Sqlx(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::FailedPrecondition(_) => 500,
            Error::Other(_) => 500,

            Error::Backend(_) => 502,
            Error::FeedUnavailable(_) => 503,
            Error::UploadTimeout { .. } => 504,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Database(_) => "database_error",
            Error::Sqlx(_) => "database_error",
            Error::Backend(_) => "backend_error",
            Error::FailedPrecondition(_) => "failed_precondition",
            Error::PermissionDenied { .. } => "permission_denied",
            Error::Unauthorized(_) => "unauthorized",
            Error::UploadTimeout { .. } => "upload_timeout",
            Error::Validation(_) => "validation_error",
            Error::NotFound(_) => "not_found",
            Error::FeedUnavailable(_) => "feed_unavailable",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.public_message();

        let details = match &error {
            Error::PermissionDenied { resource } => Some(serde_json::json!({
                "resource": resource,
            })),
            Error::UploadTimeout { secs } => Some(serde_json::json!({
                "timeout_seconds": secs,
            })),
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(Error, u16, &'static str)> {
        vec![
            (
                Error::Config {
                    message: "bad value".into(),
                    key: Some("feed.home_limit".into()),
                },
                400,
                "config_error",
            ),
            (Error::Validation("missing".into()), 400, "validation_error"),
            (Error::Unauthorized("no session".into()), 401, "unauthorized"),
            (
                Error::PermissionDenied {
                    resource: Resource::Posts,
                },
                403,
                "permission_denied",
            ),
            (Error::NotFound("post abc".into()), 404, "not_found"),
            (
                Error::Database(DatabaseError::QueryFailed("timeout".into())),
                500,
                "database_error",
            ),
            (
                Error::FailedPrecondition("index".into()),
                500,
                "failed_precondition",
            ),
            (
                Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
                500,
                "io_error",
            ),
            (
                Error::ApiServerError("bind failed".into()),
                500,
                "api_server_error",
            ),
            (Error::Other("unknown".into()), 500, "internal_error"),
            (Error::Backend("connection reset".into()), 502, "backend_error"),
            (
                Error::FeedUnavailable("Failed to load".into()),
                503,
                "feed_unavailable",
            ),
            (Error::UploadTimeout { secs: 30 }, 504, "upload_timeout"),
        ]
    }

    #[test]
    fn every_variant_maps_to_expected_status_and_code() {
        for (error, status, code) in all_error_variants() {
            assert_eq!(error.status_code(), status, "status for {error:?}");
            assert_eq!(error.error_code(), code, "code for {error:?}");
        }
    }

    #[test]
    fn server_side_failures_use_generic_message() {
        let error = Error::Database(DatabaseError::QueryFailed("SELECT exploded".into()));
        assert_eq!(error.public_message(), GENERIC_FAILURE_MESSAGE);

        let error = Error::Backend("tcp reset by peer 10.0.0.3".into());
        assert_eq!(error.public_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn permission_errors_are_distinguished_by_resource() {
        let storage = Error::PermissionDenied {
            resource: Resource::Storage,
        };
        let posts = Error::PermissionDenied {
            resource: Resource::Posts,
        };

        assert!(storage.public_message().contains("upload images"));
        assert!(posts.public_message().contains("upload news"));
        assert_ne!(storage.public_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn upload_timeout_suggests_checking_connectivity() {
        let api_error: ApiError = Error::UploadTimeout { secs: 30 }.into();

        assert_eq!(api_error.error.code, "upload_timeout");
        assert!(api_error.error.message.contains("30 seconds"));
        assert!(api_error.error.message.contains("connection"));
        assert_eq!(api_error.error.details.unwrap()["timeout_seconds"], 30);
    }

    #[test]
    fn feed_unavailable_keeps_reader_message() {
        let message = "Failed to load latest news. Please try again later.";
        let api_error: ApiError = Error::FeedUnavailable(message.into()).into();

        assert_eq!(api_error.error.code, "feed_unavailable");
        assert_eq!(api_error.error.message, message);
        assert!(api_error.error.details.is_none());
    }

    #[test]
    fn permission_denied_details_name_the_resource() {
        let api_error: ApiError = Error::PermissionDenied {
            resource: Resource::Ads,
        }
        .into();

        assert_eq!(api_error.error.details.unwrap()["resource"], "ads");
    }
}

// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),
    AlreadyExists(String),

    // 401 Unauthorized
    Unauthorized(String),
    InvalidCredentials,

    // 404 Not Found (absent or not owned - same shape either way)
    NotFound(String),

    // 500 Internal Server Error
    Internal(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::AlreadyExists(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::InvalidCredentials => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::AlreadyExists(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::InvalidCredentials => "Invalid username or password",
            ApiError::NotFound(msg) => msg,
            ApiError::Internal(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to the `{ "errors": ... }` response body
    pub fn to_json(&self) -> Value {
        json!({ "errors": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        ApiError::AlreadyExists(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert store-level errors to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            crate::database::manager::DatabaseError::ConfigMissing(_)
            | crate::database::manager::DatabaseError::InvalidDatabaseUrl
            | crate::database::manager::DatabaseError::InvalidDatabaseName(_) => {
                tracing::error!("Database configuration error: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            crate::database::manager::DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal("An error occurred while processing your request")
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal("Database error occurred")
            }
            crate::database::manager::DatabaseError::MigrationError(msg) => {
                tracing::error!("Migration error: {}", msg);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
        }
    }
}

impl From<crate::filter::FilterError> for ApiError {
    fn from(err: crate::filter::FilterError) -> Self {
        tracing::error!("Filter construction error: {}", err);
        ApiError::internal("An error occurred while processing your request")
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("Password hashing error: {}", err);
        ApiError::internal("An error occurred while processing your request")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(ApiError::validation("bad input").status_code(), 400);
        assert_eq!(ApiError::already_exists("taken").status_code(), 400);
        assert_eq!(ApiError::unauthorized("Unauthorized").status_code(), 401);
        assert_eq!(ApiError::InvalidCredentials.status_code(), 401);
        assert_eq!(ApiError::not_found("Contact not found").status_code(), 404);
        assert_eq!(ApiError::internal("boom").status_code(), 500);
    }

    #[test]
    fn login_failure_is_generic() {
        // Never distinguishes unknown username from wrong password
        assert_eq!(
            ApiError::InvalidCredentials.message(),
            "Invalid username or password"
        );
    }

    #[test]
    fn body_carries_only_a_message_string() {
        let body = ApiError::not_found("Contact not found").to_json();
        assert_eq!(body, serde_json::json!({ "errors": "Contact not found" }));
    }
}

//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the error conditions that can occur, from authentication failures
//! to database issues.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses with `{"message": ...}` JSON bodies,
//! which is the wire contract of this API. It also provides `From` trait
//! implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `bcrypt::BcryptError`, and `actix_web::error::BlockingError`, allowing easy
//! conversion with the `?` operator.

use actix_web::{error::BlockingError, error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant carries a message; the variant decides the HTTP status, the
/// message becomes the JSON body (except for server-side failures, which are
/// logged and replaced with a generic body).
#[derive(Debug)]
pub enum AppError {
    /// Authentication failure (HTTP 401): bad credentials, missing, malformed
    /// or expired token. The message is part of the public contract.
    Unauthorized(String),
    /// Client-side error (HTTP 400): malformed request, or a task that does
    /// not exist / is not owned by the caller.
    BadRequest(String),
    /// Failed input validation (HTTP 400). Wraps errors from `validator`.
    ValidationError(String),
    /// Unexpected server-side failure (HTTP 500), including crypto primitive
    /// failures. Never surfaced to the client verbatim.
    InternalServerError(String),
    /// Error originating from database operations (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Server-side failures log their detail and answer with a generic body so
/// that stack traces and partial secrets never reach the client.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal server error"
                }))
            }
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal server error"
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// The detailed validation messages are preserved in the 400 body.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Bcrypt failures are internal: hashing is never expected to fail on
/// well-formed inputs, and the detail must not leak.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// A cancelled blocking-pool task (vault work runs on the blocking pool).
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Email or password is incorrect".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        let error = AppError::BadRequest("Task not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        // Validation failures surface as 400, same as other malformed requests.
        let error = AppError::ValidationError("title: too short".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::InternalServerError("Server error".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);

        let error = AppError::DatabaseError("connection refused".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }
}

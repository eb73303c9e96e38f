// src/application/error_handling.rs
//
// Caller-facing error responses
//
// - Maps internal errors to a stable category and message
// - Never exposes driver or pool details
// - Logs internal failures for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_type: ErrorType,
    pub message: String,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Referenced entity does not exist (404)
    NotFound,

    /// Relation state conflict (409)
    Conflict,

    /// Invalid input or invariant violation (400)
    Validation,

    /// Persistence or other internal failure (500)
    Internal,
}

impl ErrorType {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorType::NotFound => 404,
            ErrorType::Conflict => 409,
            ErrorType::Validation => 400,
            ErrorType::Internal => 500,
        }
    }
}

impl ErrorResponse {
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound(message) => Self::new(ErrorType::NotFound, message),

            AppError::Conflict(message) => Self::new(ErrorType::Conflict, message),

            AppError::InvalidArgument(message) => Self::new(ErrorType::Validation, message),

            AppError::Domain(domain_error) => Self::new(ErrorType::Validation, domain_error.to_string()),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(ErrorType::Internal, "Database operation failed")
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Internal, "Database connection failed")
            }

            other => {
                log::error!("Internal error: {}", other);
                Self::new(ErrorType::Internal, "Internal error")
            }
        }
    }

    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.error_type.status_code()
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        ErrorResponse::from_app_error(error)
    }
}

/// Helper trait to convert Results to serialized error responses
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            serde_json::to_string(&ErrorResponse::from_app_error(e))
                .unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

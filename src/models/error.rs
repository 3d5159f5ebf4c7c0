use serde::Serialize;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::pix::{DecodeError, EncodeError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),
    InvalidPayload(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl From<EncodeError> for ApiError {
    fn from(e: EncodeError) -> Self {
        ApiError::ValidationError(e.to_string())
    }
}

impl From<DecodeError> for ApiError {
    fn from(e: DecodeError) -> Self {
        ApiError::InvalidPayload(e.to_string())
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::ValidationError(_) => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    code: "VALIDATION_ERROR".to_string(),
                    message: self.to_string(),
                    details: None,
                })
            }
            ApiError::InvalidPayload(_) => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    code: "INVALID_PAYLOAD".to_string(),
                    message: self.to_string(),
                    details: None,
                })
            }
            ApiError::NotFound(_) => {
                HttpResponse::NotFound().json(ErrorResponse {
                    code: "NOT_FOUND".to_string(),
                    message: self.to_string(),
                    details: None,
                })
            }
        }
    }
}

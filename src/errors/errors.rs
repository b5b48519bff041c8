use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP-facing error raised at the handler boundary
#[derive(Debug)]
pub enum ServiceError {
    // Input Errors
    MalformedInput {
        resource: &'static str,
        reason: String,
    },
    InvalidQuery(String),
    PayloadTooLarge {
        resource: &'static str,
        reason: String,
    },

    // Domain Errors
    NotFound {
        resource: &'static str,
        id: Option<String>,
        reason: String,
    },
    AlreadyExists {
        resource: &'static str,
        id: String,
        reason: String,
    },

    // Internal Errors
    Unhandled(String),
    ConfigurationError(String),

    // External Service Errors
    ExternalServiceError {
        service: String,
        reason: String,
    },
}

/// Error response structure sent to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::MalformedInput { resource, reason } => write!(
                f,
                "Malformed json could not be interpreted as [{}]: {}",
                resource, reason
            ),
            ServiceError::InvalidQuery(msg) => write!(f, "Invalid query: {}", msg),
            ServiceError::PayloadTooLarge { resource, reason } => {
                write!(f, "Payload for [{}] is too large: {}", resource, reason)
            }

            ServiceError::NotFound {
                resource,
                id: Some(id),
                reason,
            } => {
                let msg = format!("{} with ID {} not found. {}", resource, id, reason);
                f.write_str(msg.trim_end())
            }
            ServiceError::NotFound {
                resource,
                id: None,
                reason,
            } => {
                let msg = format!("{} not found. {}", resource, reason);
                f.write_str(msg.trim_end())
            }
            ServiceError::AlreadyExists {
                resource,
                id,
                reason,
            } => {
                let msg = format!(
                    "Record [{}] already exists with id '{}'. {}",
                    resource, id, reason
                );
                f.write_str(msg.trim_end())
            }

            ServiceError::Unhandled(msg) => write!(f, "Unhandled error: {}", msg),
            ServiceError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),

            ServiceError::ExternalServiceError { service, reason } => {
                write!(f, "External service error ({}): {}", service, reason)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ServiceError::MalformedInput { .. } | ServiceError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }

            // 413 Payload Too Large
            ServiceError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,

            // 404 Not Found
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,

            // 409 Conflict
            ServiceError::AlreadyExists { .. } => StatusCode::CONFLICT,

            // 502 Bad Gateway
            ServiceError::ExternalServiceError { .. } => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            ServiceError::Unhandled(_) | ServiceError::ConfigurationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code string for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::MalformedInput { .. } => "MALFORMED_INPUT",
            ServiceError::InvalidQuery(_) => "INVALID_QUERY",
            ServiceError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::AlreadyExists { .. } => "ALREADY_EXISTS",
            ServiceError::Unhandled(_) => "INTERNAL_SERVER_ERROR",
            ServiceError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            ServiceError::ExternalServiceError { .. } => "EXTERNAL_SERVICE_ERROR",
        }
    }

    /// Convert error to JSON details for response
    pub fn to_details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::MalformedInput { resource, .. }
            | ServiceError::PayloadTooLarge { resource, .. } => Some(serde_json::json!({
                "resource": resource
            })),
            ServiceError::NotFound { resource, id, .. } => Some(serde_json::json!({
                "resource": resource,
                "id": id
            })),
            ServiceError::AlreadyExists { resource, id, .. } => Some(serde_json::json!({
                "resource": resource,
                "id": id
            })),
            ServiceError::ExternalServiceError { service, reason } => Some(serde_json::json!({
                "service": service,
                "reason": reason
            })),
            _ => None,
        }
    }
}

/// Implement IntoResponse for Axum integration
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: self.to_details(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Conversion from outbound transport errors
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let service = err
            .url()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        ServiceError::ExternalServiceError {
            service,
            reason: err.to_string(),
        }
    }
}

/// Type alias for Results using ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

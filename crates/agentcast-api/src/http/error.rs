//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use agentcast_types::error::{ArtifactError, DispatchError, RegistryError};

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Unknown agent identifier.
    Registry(RegistryError),
    /// Artifact storage failure.
    Artifact(ArtifactError),
    /// Agent invocation failure.
    Dispatch(DispatchError),
    /// Malformed request.
    Validation(String),
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        AppError::Registry(e)
    }
}

impl From<ArtifactError> for AppError {
    fn from(e: ArtifactError) -> Self {
        AppError::Artifact(e)
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::Dispatch(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Registry(RegistryError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "AGENT_NOT_FOUND", "Agent not found".to_string())
            }
            AppError::Artifact(ArtifactError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "FILE_NOT_FOUND", "File not found".to_string())
            }
            AppError::Artifact(e @ ArtifactError::InvalidName(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Artifact(e @ ArtifactError::TooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE", e.to_string())
            }
            AppError::Artifact(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Dispatch(e @ DispatchError::TimedOut(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "AGENT_TIMEOUT", e.to_string())
            }
            AppError::Dispatch(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AGENT_ERROR", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::warn!(code, %message, "request failed");
        }

        let body = ApiResponse::error(code, message, uuid::Uuid::now_v7().to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentcast_types::error::AgentError;
    use std::time::Duration;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status(RegistryError::NotFound("x".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(ArtifactError::NotFound("a.txt".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(ArtifactError::InvalidName("../a".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ArtifactError::TooLarge { size: 2, max: 1 }.into()),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status(DispatchError::TimedOut(Duration::from_secs(5)).into()),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status(DispatchError::Agent(AgentError::Model("boom".to_string())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_agent_error_message_preserved() {
        let err: AppError = DispatchError::Agent(AgentError::Model("boom".to_string())).into();
        let (_, code, message) = err.parts();
        assert_eq!(code, "AGENT_ERROR");
        assert_eq!(message, "boom");
    }
}

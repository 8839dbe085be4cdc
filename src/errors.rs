use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Generation service error: {0}")]
    GenerationServiceError(String),

    #[error("Generation format error: {0}")]
    GenerationFormatError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::GenerationServiceError(_) => "GENERATION_SERVICE_ERROR",
            AppError::GenerationFormatError(_) => "GENERATION_FORMAT_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether asking the user to try the same request again can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::GenerationServiceError(_) | AppError::GenerationFormatError(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
    pub retryable: bool,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConfigError(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::GenerationFormatError(_) => StatusCode::BAD_GATEWAY,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
            retryable: self.is_retryable(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::GenerationServiceError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::InternalError(format!("CSV export error: {}", err))
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
            e.set("retryable", self.is_retryable());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ConfigError("topic".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::GenerationServiceError("quota".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::NotFound("session".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InternalError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::GenerationFormatError("no JSON array found".into());
        assert_eq!(
            err.to_string(),
            "Generation format error: no JSON array found"
        );
    }

    #[test]
    fn test_service_and_format_errors_are_distinct_codes() {
        let service = AppError::GenerationServiceError("timeout".into());
        let format = AppError::GenerationFormatError("bad json".into());

        assert_ne!(service.error_code(), format.error_code());
        assert!(service.is_retryable());
        assert!(format.is_retryable());
        assert!(!AppError::ConfigError("missing key".into()).is_retryable());
    }

    #[test]
    fn test_graphql_extension_carries_code() {
        let err = AppError::NotFound("session".into()).extend();
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();

        assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    }
}

use crate::audit::import::ReviewImportError;
use crate::audit::service::{AuditError, CreditError};
use crate::audit::signals::SignalError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Audit(AuditError),
    Import(ReviewImportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "invalid configuration: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry setup failed: {}", err),
            AppError::Io(err) => write!(f, "io failure: {}", err),
            AppError::Server(err) => write!(f, "http server failure: {}", err),
            AppError::Audit(err) => write!(f, "audit failed: {}", err),
            AppError::Import(err) => write!(f, "review import failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Audit(err) => Some(err),
            AppError::Import(err) => Some(err),
        }
    }
}

/// Status code for an audit failure, shared by every surface that turns
/// [`AuditError`] into an HTTP response.
pub(crate) fn audit_status(error: &AuditError) -> StatusCode {
    match error {
        AuditError::Credit(CreditError::InsufficientBalance { .. }) => {
            StatusCode::PAYMENT_REQUIRED
        }
        AuditError::Signal(SignalError::Invalid { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        AuditError::Signal(SignalError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        AuditError::Credit(CreditError::Unavailable(_))
        | AuditError::Analysis { .. }
        | AuditError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Audit(error) => audit_status(error),
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AuditError> for AppError {
    fn from(value: AuditError) -> Self {
        Self::Audit(value)
    }
}

impl From<ReviewImportError> for AppError {
    fn from(value: ReviewImportError) -> Self {
        Self::Import(value)
    }
}

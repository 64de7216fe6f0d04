use crate::cnpj::CnpjError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The request did not carry a CNPJ.
    MissingCnpj(Option<String>),
    /// The CNPJ failed check-digit validation.
    InvalidCnpj(CnpjError),
    /// Bad request error (invalid input other than the CNPJ).
    BadRequest(String),
    /// Failure while aggregating, scoring or rendering a dossier.
    Processing(String),
    /// Error interacting with an external API.
    ExternalApiError(String),
    /// Internal server error.
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorBody {
    /// Human readable message.
    pub error: String,
    /// Stable machine readable code, e.g. `MISSING_CNPJ`.
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// The error code exposed in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingCnpj(_) => "MISSING_CNPJ",
            AppError::InvalidCnpj(_) => "INVALID_CNPJ",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Processing(_) => "PROCESSING_ERROR",
            AppError::ExternalApiError(_) | AppError::InternalError(_) => "INTERNAL_ERROR",
            AppError::WithContext { source, .. } => source.code(),
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCnpj(_) | AppError::InvalidCnpj(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Processing(_)
            | AppError::ExternalApiError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::WithContext { source, .. } => source.status(),
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingCnpj(_) => write!(f, "CNPJ is required"),
            AppError::InvalidCnpj(e) => write!(f, "Invalid CNPJ: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Processing(msg) => write!(f, "Processing error: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into the `{ error, code, details? }` envelope.
    ///
    /// Client errors keep their message; server errors are logged and
    /// reported with a generic message plus the detail string.
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let (error, details) = match &self {
            AppError::MissingCnpj(details) => ("CNPJ is required".to_string(), details.clone()),
            AppError::InvalidCnpj(e) => ("Invalid CNPJ".to_string(), Some(e.to_string())),
            AppError::BadRequest(msg) => (msg.clone(), None),
            AppError::Processing(msg) => {
                tracing::error!("Processing error: {}", msg);
                ("Failed to process CNPJ".to_string(), Some(msg.clone()))
            }
            AppError::ExternalApiError(msg) => {
                tracing::error!("External API error: {}", msg);
                ("External service error".to_string(), None)
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), None)
            }
            AppError::WithContext { source, context } => {
                // Log full context chain for debugging
                tracing::error!("Error with context: {} -> {}", context, source);
                // Delegate to underlying error's response
                return source.as_ref().clone().into_response();
            }
        };

        let body = Json(ApiErrorBody {
            error,
            code,
            details,
        });

        (status, body).into_response()
    }
}

impl From<CnpjError> for AppError {
    fn from(err: CnpjError) -> Self {
        AppError::InvalidCnpj(err)
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::ExternalApiError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Processing(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: f(),
        })
    }
}

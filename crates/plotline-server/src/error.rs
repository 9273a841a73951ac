//! Application-wide error types using thiserror.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use plotline_common::PlotlineError;
use plotline_render::RenderError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Main server error type.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] PlotlineError),

    /// Chart rendering error.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The request body could not be used.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Status reported to the caller.
        status: StatusCode,
        /// Human-readable reason.
        message: String,
    },

    /// The listen address does not parse.
    #[error("Invalid bind address '{address}': {source}")]
    BindAddress {
        /// The offending address.
        address: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the server.
pub type ServerResult<T> = Result<T, ServerError>;

/// JSON body of every API error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong, or a generic message for server-side failures.
    pub error: String,
}

impl ServerError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { status, .. } => *status,
            Self::Render(RenderError::NonFiniteSample { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Config(err) if err.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ServerError> for PlotlineError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Config(inner) => inner,
            ServerError::Render(inner) => inner.into(),
            ServerError::Io(inner) => Self::Io(inner),
            ServerError::InvalidRequest { message, .. } => Self::validation(message),
            other => Self::server_with_source("Server error", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let non_finite = ServerError::from(RenderError::NonFiniteSample {
            index: 2,
            value: f64::NAN,
        });
        assert_eq!(non_finite.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let draw = ServerError::from(RenderError::Draw("backend".to_string()));
        assert_eq!(draw.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let invalid = ServerError::InvalidRequest {
            status: StatusCode::BAD_REQUEST,
            message: "syntax".to_string(),
        };
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let validation = ServerError::from(PlotlineError::validation("bad width"));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let response = ServerError::from(RenderError::Draw("secret path".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conversion_to_plotline_error() {
        let err: PlotlineError = ServerError::from(RenderError::NonFiniteSample {
            index: 0,
            value: f64::INFINITY,
        })
        .into();
        assert!(err.is_client_error());

        let err: PlotlineError = ServerError::from(RenderError::Draw("x".to_string())).into();
        assert!(!err.is_client_error());
    }
}

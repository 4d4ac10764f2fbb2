//! Error types for the HTTP layer.
//!
//! [`ApiError`] is what handlers return; it renders as `{"error": "..."}` with
//! a status code chosen by the failure. [`ServerError`] covers process startup.

use std::io;
use std::str::Utf8Error;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mipsim_core::common::error::{ConfigError, LoadError, SimError};
use serde_json::json;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, error};

/// A request that could not be served.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The simulator rejected the request (bad program, bad reset PC, ...).
    #[error(transparent)]
    Sim(#[from] SimError),

    /// A query parameter could not be parsed.
    #[error("invalid {name} '{value}'")]
    BadParam {
        /// Parameter name as it appears in the query string.
        name: &'static str,
        /// The raw value.
        value: String,
    },

    /// A step request asked for more cycles than the configured cap.
    #[error("cycles {requested} exceeds the limit of {max} per request")]
    TooManyCycles {
        /// The requested count.
        requested: u64,
        /// `pipeline.max_step_cycles`.
        max: u64,
    },

    /// The request body is not UTF-8 text.
    #[error("request body is not valid UTF-8: {0}")]
    Body(#[from] Utf8Error),

    /// The blocking simulation task panicked or was cancelled.
    #[error("simulation task failed: {0}")]
    Task(#[from] JoinError),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Sim(SimError::Config(_)) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Sim(_) | Self::BadParam { .. } | Self::TooManyCycles { .. } | Self::Body(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        Self::Sim(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, %status, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Failure while starting or running the server process.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The `--config` file could not be used.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The listen address could not be bound.
    #[error("cannot listen on {addr}: {source}")]
    Bind {
        /// `host:port` that was requested.
        addr: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

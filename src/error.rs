//! Error types for the gateway
//!
//! Each layer has its own error enum; `ApiError` is the one handlers return
//! and renders every failure as a problem document.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::{ProblemDetails, ValidationErrors};

/// Title used for every problem that originates upstream.
pub const UPSTREAM_FAILURE_TITLE: &str = "Fallo al obtener datos del API de Ghibli";

/// Title used for failures of the gateway's own backing stores.
const INTERNAL_FAILURE_TITLE: &str = "An error occurred while processing your request.";

/// Detail used when the upstream answers successfully with nothing.
pub const NO_CONTENT_DETAIL: &str = "No data received from Ghibli API";

// == Cache Error ==
/// Failure talking to the cache store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Could not obtain a connection from the pool
    #[error("cache pool error: {0}")]
    Pool(String),

    /// Command failed on the cache server
    #[error("cache command error: {0}")]
    Command(String),
}

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        CacheError::Pool(err.to_string())
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Command(err.to_string())
    }
}

// == Upstream Error ==
/// Transport-level failure of an outbound catalog call.
///
/// A non-success HTTP status is not an error at this level; see
/// [`crate::upstream::UpstreamResponse::Failure`].
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Network unreachable, connection reset, timeout
    #[error("upstream transport error: {0}")]
    Transport(String),

    /// Successful status but the body is not JSON
    #[error("upstream returned an undecodable body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}

// == Repository Error ==
/// Failure of the comment store.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::from_persistence(err)
    }
}

// == API Error ==
/// Unified error type returned by handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Comment fields failed validation
    #[error("one or more validation errors occurred")]
    Validation(ValidationErrors),

    /// Request body could not be read as JSON
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource kind needs an id and none was given
    #[error("an id is required for {0}")]
    MissingId(&'static str),

    /// Upstream answered with a non-success status
    #[error("upstream responded with status {status}")]
    Upstream { status: StatusCode, body: String },

    /// Upstream answered successfully without a document
    #[error("{}", NO_CONTENT_DETAIL)]
    NoContent,

    /// No route under the API prefix
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] UpstreamError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Persistence(#[from] RepoError),
}

impl ApiError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::MissingId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream { status, .. } => *status,
            ApiError::NoContent => StatusCode::NO_CONTENT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Transport(_) => StatusCode::BAD_GATEWAY,
            ApiError::Cache(_) | ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_problem(self) -> ProblemDetails {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => ProblemDetails::validation(errors),
            ApiError::Upstream { body, .. } => {
                ProblemDetails::new(status, UPSTREAM_FAILURE_TITLE, body)
            }
            ApiError::NoContent => {
                ProblemDetails::new(status, UPSTREAM_FAILURE_TITLE, NO_CONTENT_DETAIL)
            }
            ApiError::Transport(err) => {
                error!(error = %err, "upstream call failed");
                ProblemDetails::new(status, UPSTREAM_FAILURE_TITLE, err.to_string())
            }
            ApiError::Cache(err) => {
                error!(error = %err, "cache store failed");
                ProblemDetails::new(status, INTERNAL_FAILURE_TITLE, err.to_string())
            }
            ApiError::Persistence(err) => {
                error!(error = %err, "comment store failed");
                ProblemDetails::new(status, INTERNAL_FAILURE_TITLE, err.to_string())
            }
            other => ProblemDetails::new(status, default_title(status), other.to_string()),
        }
    }
}

fn default_title(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Error")
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let problem = self.into_problem();

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers and the resolver.
pub type Result<T> = std::result::Result<T, ApiError>;

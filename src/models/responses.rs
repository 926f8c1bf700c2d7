//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ValidationErrors;

/// Body of GET /api/
pub const WELCOME_MESSAGE: &str = "Bienvenido a la API Ghibli v2!";

/// A stored comment.
///
/// Returned as the body of POST /api/comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Sequential identity assigned by the store
    pub id: i64,
    pub name: String,
    pub content: String,
    pub ip_address: String,
    pub browser_info: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Reference emitted in the `Location` header after creation.
    pub fn location(&self) -> String {
        format!("/api/comments/{}", self.id)
    }
}

/// Opaque catalog document.
///
/// Holds the serialized JSON text exactly as it is cached, so a cached and
/// a freshly fetched response for the same key are byte-identical. The
/// gateway never looks inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    /// Serializes a parsed upstream document.
    pub fn from_value(value: &serde_json::Value) -> serde_json::Result<Self> {
        serde_json::to_string(value).map(Self)
    }

    /// Wraps text read back from the cache without re-validating it.
    pub fn from_cached(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl IntoResponse for Document {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            self.0,
        )
            .into_response()
    }
}

/// Problem document for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    pub detail: String,
    /// Field-level messages, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ProblemDetails {
    /// Creates a new ProblemDetails
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
            errors: None,
        }
    }

    /// Creates a 400 problem carrying field-level errors
    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            title: "One or more validation errors occurred.".to_string(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            detail: "See the errors property for details.".to_string(),
            errors: Some(errors),
        }
    }
}

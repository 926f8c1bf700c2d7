//! Upstream Module
//!
//! Outbound calls to the public catalog API.

mod client;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;

use crate::error::UpstreamError;

pub use client::GhibliClient;

/// Default catalog address
pub const DEFAULT_BASE_URL: &str = "https://ghibli.rest/";

/// Outcome of an upstream call that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResponse {
    /// 2xx with a JSON document
    Document(Value),
    /// 2xx with an empty body or a JSON `null`
    Empty,
    /// Any non-success status, with the raw body
    Failure { status: StatusCode, body: String },
}

/// Issues GET requests relative to a fixed base address.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// `path` is relative to the base address and may carry a query string.
    async fn get(&self, path: &str) -> Result<UpstreamResponse, UpstreamError>;
}

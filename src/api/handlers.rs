//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::cache::{CacheStore, MemoryCache, RedisCache};
use crate::comments::{CommentRepository, MemoryCommentRepository, MySqlCommentRepository};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{Comment, CreateCommentRequest, Document, WELCOME_MESSAGE};
use crate::resolver::{ResourceKind, Resolver};
use crate::upstream::{GhibliClient, UpstreamClient};

/// Path every request outside the API prefix is sent to.
pub const API_ROOT: &str = "/api/";

/// Application state shared across all handlers.
///
/// Built once at startup; every dependency lives as long as the process.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    pub fn new(resolver: Resolver, comments: Arc<dyn CommentRepository>) -> Self {
        Self { resolver, comments }
    }

    /// Assembles the state from its three external dependencies.
    pub fn from_parts(
        cache: Arc<dyn CacheStore>,
        upstream: Arc<dyn UpstreamClient>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self::new(Resolver::new(cache, upstream), comments)
    }

    /// Connects every backing service named in the configuration.
    ///
    /// Without `REDIS_URL` or `DATABASE_URL` the matching in-memory store
    /// is used instead.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let upstream = GhibliClient::new(config.upstream_base_url.clone())
            .context("failed to build upstream HTTP client")?;

        let cache: Arc<dyn CacheStore> = match &config.redis_url {
            Some(url) => {
                let cache = RedisCache::connect(url, config.redis_instance_name.clone())
                    .context("failed to create Redis pool")?;
                info!("Using Redis cache with instance name {:?}", config.redis_instance_name);
                Arc::new(cache)
            }
            None => {
                warn!("REDIS_URL not set, caching catalog documents in memory");
                Arc::new(MemoryCache::new())
            }
        };

        let comments: Arc<dyn CommentRepository> = match &config.database_url {
            Some(url) => {
                let pool = MySqlCommentRepository::connect(url, config.database_max_connections)
                    .await
                    .context("failed to connect to MySQL")?;
                MySqlCommentRepository::run_migrations(&pool)
                    .await
                    .context("failed to apply migrations")?;
                info!("Connected to comment database");
                Arc::new(MySqlCommentRepository::new(pool))
            }
            None => {
                warn!("DATABASE_URL not set, comments will not survive a restart");
                Arc::new(MemoryCommentRepository::new())
            }
        };

        Ok(Self::from_parts(cache, Arc::new(upstream), comments))
    }
}

/// Handler for GET /api/
pub async fn welcome_handler() -> &'static str {
    WELCOME_MESSAGE
}

/// Handler for GET /api/{kind}
///
/// Shared by every resource kind that allows listing; the router binds `kind`.
pub async fn collection_handler(
    State(state): State<AppState>,
    kind: ResourceKind,
) -> Result<Document> {
    state.resolver.resolve(kind, None).await
}

/// Handler for GET /api/{kind}/:id
///
/// An id that cannot be extracted is rejected rather than treated as absent.
pub async fn item_handler(
    State(state): State<AppState>,
    kind: ResourceKind,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Document> {
    let Path(id) = id.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    state.resolver.resolve(kind, Some(&id)).await
}

/// Handler for POST /api/comments
///
/// Validates the body before touching the store and answers 201 with a
/// `Location` reference to the new record.
pub async fn create_comment_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Comment>)> {
    let Json(req) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let comment = req.validate().map_err(ApiError::Validation)?;

    let stored = state.comments.insert(comment).await?;
    info!(id = stored.id, "comment stored");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, stored.location())],
        Json(stored),
    ))
}

/// Fallback for unmatched requests.
///
/// Anything outside `/api` is redirected to the API root; unknown paths
/// inside it are a 404 problem.
pub async fn fallback_handler(uri: Uri) -> Response {
    if is_api_path(uri.path()) {
        return ApiError::NotFound(uri.path().to_string()).into_response();
    }

    (StatusCode::FOUND, [(header::LOCATION, API_ROOT)]).into_response()
}

/// True for `/api` and anything below `/api/`.
pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

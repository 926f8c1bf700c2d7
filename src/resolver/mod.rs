//! Cache-Aside Resolver
//!
//! Serves catalog documents from the cache, falling back to the upstream
//! API on a miss and populating the cache with successful results.

mod kind;

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::cache::{CacheStore, CACHE_TTL};
use crate::error::{ApiError, Result, UpstreamError};
use crate::models::Document;
use crate::upstream::{UpstreamClient, UpstreamResponse};

pub use kind::ResourceKind;

/// Cache-aside read path shared by every catalog endpoint.
#[derive(Clone)]
pub struct Resolver {
    cache: Arc<dyn CacheStore>,
    upstream: Arc<dyn UpstreamClient>,
}

impl Resolver {
    pub fn new(cache: Arc<dyn CacheStore>, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self { cache, upstream }
    }

    /// Returns the document for `kind` and optional `id`.
    ///
    /// An empty `id` counts as absent. Only successful, non-empty upstream
    /// documents are cached.
    #[instrument(skip(self, kind), fields(kind = %kind))]
    pub async fn resolve(&self, kind: ResourceKind, id: Option<&str>) -> Result<Document> {
        let id = id.filter(|id| !id.is_empty());
        if kind.id_required() && id.is_none() {
            return Err(ApiError::MissingId(kind.as_str()));
        }

        let key = kind.cache_key(id);
        if let Some(cached) = self.cache.get(&key).await? {
            if !cached.is_empty() {
                debug!(key = %key, "cache hit");
                return Ok(Document::from_cached(cached));
            }
        }
        debug!(key = %key, "cache miss");

        let path = kind.upstream_path(id);
        let value = match self.upstream.get(&path).await? {
            UpstreamResponse::Document(value) => value,
            UpstreamResponse::Empty => return Err(ApiError::NoContent),
            UpstreamResponse::Failure { status, body } => {
                info!(path = %path, %status, "upstream request failed");
                return Err(ApiError::Upstream { status, body });
            }
        };

        let document = Document::from_value(&value)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;
        self.cache
            .set(&key, document.as_str().to_string(), CACHE_TTL)
            .await?;

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::error::CacheError;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Upstream double that replays one canned response and records paths.
    struct StubUpstream {
        response: UpstreamResponse,
        calls: Mutex<Vec<String>>,
    }

    impl StubUpstream {
        fn new(response: UpstreamResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UpstreamClient for StubUpstream {
        async fn get(&self, path: &str) -> std::result::Result<UpstreamResponse, UpstreamError> {
            self.calls.lock().unwrap().push(path.to_string());
            Ok(self.response.clone())
        }
    }

    struct BrokenCache;

    #[async_trait]
    impl CacheStore for BrokenCache {
        async fn get(&self, _key: &str) -> std::result::Result<Option<String>, CacheError> {
            Err(CacheError::Pool("connection refused".to_string()))
        }

        async fn set(
            &self,
            _key: &str,
            _value: String,
            _ttl: Duration,
        ) -> std::result::Result<(), CacheError> {
            Err(CacheError::Pool("connection refused".to_string()))
        }
    }

    fn resolver(upstream: Arc<StubUpstream>) -> (Resolver, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new());
        (Resolver::new(cache.clone(), upstream), cache)
    }

    #[tokio::test]
    async fn test_miss_then_hit_is_byte_identical() {
        let upstream = StubUpstream::new(UpstreamResponse::Document(json!([{"title": "Ponyo"}])));
        let (resolver, cache) = resolver(upstream.clone());

        let first = resolver.resolve(ResourceKind::Films, None).await.unwrap();
        let second = resolver.resolve(ResourceKind::Films, None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(upstream.calls(), vec!["films"]);
        assert_eq!(
            cache.get("films").await.unwrap().as_deref(),
            Some(first.as_str())
        );
    }

    #[tokio::test]
    async fn test_every_kind_populates_its_own_key() {
        for kind in ResourceKind::ALL {
            let upstream = StubUpstream::new(UpstreamResponse::Document(json!({"id": "1"})));
            let (resolver, cache) = resolver(upstream.clone());

            resolver.resolve(kind, Some("1")).await.unwrap();
            resolver.resolve(kind, Some("1")).await.unwrap();

            assert_eq!(upstream.calls(), vec![kind.upstream_path(Some("1"))]);
            assert!(cache.get(&kind.cache_key(Some("1"))).await.unwrap().is_some());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_triggers_refetch() {
        let upstream = StubUpstream::new(UpstreamResponse::Document(json!({"name": "Catbus"})));
        let (resolver, _) = resolver(upstream.clone());

        resolver.resolve(ResourceKind::Vehicles, None).await.unwrap();
        tokio::time::advance(CACHE_TTL - Duration::from_secs(1)).await;
        resolver.resolve(ResourceKind::Vehicles, None).await.unwrap();
        assert_eq!(upstream.calls().len(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        resolver.resolve(ResourceKind::Vehicles, None).await.unwrap();
        assert_eq!(upstream.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_propagated_and_not_cached() {
        let upstream = StubUpstream::new(UpstreamResponse::Failure {
            status: StatusCode::NOT_FOUND,
            body: "film not found".to_string(),
        });
        let (resolver, cache) = resolver(upstream.clone());

        let err = resolver
            .resolve(ResourceKind::Films, Some("999"))
            .await
            .unwrap_err();

        match err {
            ApiError::Upstream { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, "film not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(cache.is_empty().await);

        resolver.resolve(ResourceKind::Films, Some("999")).await.unwrap_err();
        assert_eq!(upstream.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_upstream_is_no_content_and_not_cached() {
        let upstream = StubUpstream::new(UpstreamResponse::Empty);
        let (resolver, cache) = resolver(upstream.clone());

        let err = resolver
            .resolve(ResourceKind::Vehicles, Some("5"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NoContent));
        assert_eq!(upstream.calls(), vec!["vehicles?id=5"]);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_people_requires_id() {
        let upstream = StubUpstream::new(UpstreamResponse::Empty);
        let (resolver, _) = resolver(upstream.clone());

        let err = resolver.resolve(ResourceKind::People, Some("")).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingId("people")));
        assert!(upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_id_is_treated_as_absent() {
        let upstream = StubUpstream::new(UpstreamResponse::Document(json!([])));
        let (resolver, cache) = resolver(upstream.clone());

        resolver.resolve(ResourceKind::Species, Some("")).await.unwrap();
        assert_eq!(upstream.calls(), vec!["species"]);
        assert!(cache.get("species").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_cached_value_is_a_miss() {
        let upstream = StubUpstream::new(UpstreamResponse::Document(json!({"a": 1})));
        let (resolver, cache) = resolver(upstream.clone());
        cache
            .set("locations", String::new(), CACHE_TTL)
            .await
            .unwrap();

        let doc = resolver.resolve(ResourceKind::Locations, None).await.unwrap();
        assert_eq!(doc.as_str(), r#"{"a":1}"#);
        assert_eq!(upstream.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_cached_text_is_served_verbatim() {
        let upstream = StubUpstream::new(UpstreamResponse::Empty);
        let (resolver, cache) = resolver(upstream.clone());
        cache
            .set("people_7", "not even json".to_string(), CACHE_TTL)
            .await
            .unwrap();

        let doc = resolver.resolve(ResourceKind::People, Some("7")).await.unwrap();
        assert_eq!(doc.as_str(), "not even json");
        assert!(upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cache_failure_is_surfaced() {
        let upstream = StubUpstream::new(UpstreamResponse::Document(json!({})));
        let resolver = Resolver::new(Arc::new(BrokenCache), upstream.clone());

        let err = resolver.resolve(ResourceKind::Films, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Cache(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

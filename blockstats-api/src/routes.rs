//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Aggregate stats
        .route("/stats", get(handlers::get_stats))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use blockstats_core::constants::STATS_CACHE_KEY;
    use blockstats_core::types::Stat;
    use blockstats_store::MemoryStatRepository;

    use crate::state::ApiConfig;

    fn test_app(repo: Arc<MemoryStatRepository>) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(ApiConfig::default(), repo));
        (create_router(state.clone()), state)
    }

    async fn send_get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = test_app(Arc::new(MemoryStatRepository::new()));

        let response = send_get(&app, "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cacheEntries"], 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cache_queries_source_and_caches() {
        let repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(100)));
        let (app, state) = test_app(repo.clone());

        let response = send_get(&app, "/stats").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"totalBlocks":100}"#);
        assert_eq!(repo.query_count(), 1);
        assert_eq!(state.cache.get(STATS_CACHE_KEY), Some(Stat::new(100)));
        assert_eq!(
            state.cache.remaining_ttl(STATS_CACHE_KEY),
            Some(Duration::from_secs(60))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_entry_served_without_query() {
        let repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(7)));
        let (app, state) = test_app(repo.clone());
        state
            .cache
            .set_with_ttl(STATS_CACHE_KEY, Stat::new(100), Duration::from_secs(60));
        tokio::time::advance(Duration::from_secs(30)).await;

        let response = send_get(&app, "/stats").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"totalBlocks":100}"#);
        assert_eq!(repo.query_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_request_within_ttl_hits_cache() {
        let repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(100)));
        let (app, _) = test_app(repo.clone());

        assert_eq!(send_get(&app, "/stats").await.status(), StatusCode::OK);

        // The source moves on, but the cached value is still served.
        repo.set(Stat::new(200));
        tokio::time::advance(Duration::from_secs(59)).await;

        let response = send_get(&app, "/stats").await;
        assert_eq!(body_string(response).await, r#"{"totalBlocks":100}"#);
        assert_eq!(repo.query_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_requeries_source() {
        let repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(100)));
        let (app, state) = test_app(repo.clone());

        send_get(&app, "/stats").await;
        repo.set(Stat::new(200));
        tokio::time::advance(Duration::from_secs(60)).await;

        let response = send_get(&app, "/stats").await;
        assert_eq!(body_string(response).await, r#"{"totalBlocks":200}"#);
        assert_eq!(repo.query_count(), 2);
        assert_eq!(state.cache.get(STATS_CACHE_KEY), Some(Stat::new(200)));
    }

    #[tokio::test]
    async fn test_source_failure_returns_422_and_caches_nothing() {
        let repo = Arc::new(MemoryStatRepository::new());
        let (app, state) = test_app(repo.clone());

        let response = send_get(&app, "/stats").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "STATS_UNAVAILABLE");
        assert!(body.get("totalBlocks").is_none());
        assert!(state.cache.is_empty());
        assert_eq!(repo.query_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_leave_single_entry() {
        let repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(100)));
        let (app, state) = test_app(repo.clone());

        let (a, b) = tokio::join!(send_get(&app, "/stats"), send_get(&app, "/stats"));

        assert_eq!(a.status(), StatusCode::OK);
        assert_eq!(b.status(), StatusCode::OK);
        assert!((1..=2).contains(&repo.query_count()));
        assert_eq!(state.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (app, _) = test_app(Arc::new(MemoryStatRepository::new()));
        assert_eq!(send_get(&app, "/nope").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_is_not_configurable_from_env() {
        std::env::set_var("STATS_TTL_SECS", "0");
        let repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(100)));
        let state = Arc::new(AppState::new(ApiConfig::from_env(), repo.clone()));
        let app = create_router(state.clone());

        for _ in 0..3 {
            assert_eq!(send_get(&app, "/stats").await.status(), StatusCode::OK);
        }

        assert_eq!(repo.query_count(), 1);
        assert_eq!(
            state.cache.remaining_ttl(STATS_CACHE_KEY),
            Some(Duration::from_secs(60))
        );
    }

    #[tokio::test]
    async fn test_routers_sharing_a_cache_share_entries() {
        let cache = Arc::new(blockstats_cache::TtlCache::new());
        let first_repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(100)));
        let second_repo = Arc::new(MemoryStatRepository::with_stat(Stat::new(200)));

        let first = create_router(Arc::new(AppState::with_cache(
            ApiConfig::default(),
            first_repo.clone(),
            cache.clone(),
        )));
        let second = create_router(Arc::new(AppState::with_cache(
            ApiConfig::default(),
            second_repo.clone(),
            cache.clone(),
        )));

        send_get(&first, "/stats").await;
        let response = send_get(&second, "/stats").await;

        assert_eq!(body_string(response).await, r#"{"totalBlocks":100}"#);
        assert_eq!(first_repo.query_count(), 1);
        assert_eq!(second_repo.query_count(), 0);
        assert_eq!(cache.len(), 1);
    }
}

//! Router composition
//!
//! Assembles the bounded-context routers and the cross-cutting layers.
//! Generic over repositories and the cache backend so tests can compose
//! the same application over in-memory implementations.

use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router, middleware};
use platform::cache::{CacheBackend, Cacheable, EntityCache};
use platform::middleware::enforce_rate_limit;
use platform::rate_limit::FixedWindowLimiter;
use posts::domain::repository::{CommentRepository, PostRepository};
use posts::posts_router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use users::domain::repository::{FollowerRepository, UserRepository};
use users::users_router;

use crate::config::ApiConfig;

#[derive(Clone)]
struct HealthState {
    env: Arc<str>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    env: String,
    version: &'static str,
}

/// GET /v1/health
async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        env: state.env.to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn cors(config: &ApiConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

fn entity_cache<T, B>(backend: Option<B>, config: &ApiConfig) -> EntityCache<T, B>
where
    T: Cacheable,
    B: CacheBackend + Sync,
{
    match backend {
        Some(backend) => EntityCache::new(backend, &config.cache),
        None => EntityCache::disabled(),
    }
}

/// Build the full application router
///
/// `cache_backend` of `None` runs with caching disabled. `limiter` of
/// `None` installs no admission layer at all.
pub fn build_router<PR, UR, B>(
    config: &ApiConfig,
    posts_repo: PR,
    users_repo: UR,
    cache_backend: Option<B>,
    limiter: Option<FixedWindowLimiter>,
) -> Router
where
    PR: PostRepository + CommentRepository + Send + Sync + 'static,
    UR: UserRepository + FollowerRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let health_routes = Router::new()
        .route("/v1/health", get(health))
        .with_state(HealthState {
            env: Arc::from(config.env.as_str()),
        });

    let mut app = health_routes
        .merge(posts_router(posts_repo, entity_cache(cache_backend.clone(), config)))
        .merge(users_router(users_repo, entity_cache(cache_backend, config)));

    if let Some(limiter) = limiter {
        app = app.layer(middleware::from_fn_with_state(
            limiter,
            enforce_rate_limit::<FixedWindowLimiter>,
        ));
    }

    app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        config.http_timeout,
    ))
    .layer(TraceLayer::new_for_http())
    .layer(cors(config))
}

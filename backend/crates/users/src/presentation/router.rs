//! Users Router

use crate::domain::entities::User;
use crate::domain::repository::{FollowerRepository, UserRepository};
use crate::presentation::handlers::{self, UsersAppState};
use axum::{
    Router,
    routing::{get, post, put},
};
use platform::cache::{CacheBackend, EntityCache};
use std::sync::Arc;

/// Create the users router for any repository and cache backend
pub fn users_router<R, B>(repo: R, cache: EntityCache<User, B>) -> Router
where
    R: UserRepository + FollowerRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let state = UsersAppState {
        repo: Arc::new(repo),
        cache,
    };

    Router::new()
        .route("/v1/users", post(handlers::create_user::<R, B>))
        .route("/v1/users/{id}", get(handlers::get_user::<R, B>))
        .route("/v1/users/{id}/follow", put(handlers::follow_user::<R, B>))
        .route(
            "/v1/users/{id}/unfollow",
            put(handlers::unfollow_user::<R, B>),
        )
        .with_state(state)
}

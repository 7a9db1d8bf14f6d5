//! Posts Router

use crate::domain::entities::Post;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::presentation::handlers::{self, PostsAppState};
use axum::{
    Router,
    routing::{get, post},
};
use platform::cache::{CacheBackend, EntityCache};
use std::sync::Arc;

/// Create the posts router for any repository and cache backend
///
/// The repository serves both posts and their comments.
pub fn posts_router<R, B>(repo: R, cache: EntityCache<Post, B>) -> Router
where
    R: PostRepository + CommentRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let state = PostsAppState {
        repo: Arc::new(repo),
        cache,
    };

    Router::new()
        .route("/v1/posts", post(handlers::create_post::<R, B>))
        .route(
            "/v1/posts/{id}",
            get(handlers::get_post::<R, B>)
                .patch(handlers::update_post::<R, B>)
                .delete(handlers::delete_post::<R, B>),
        )
        .route(
            "/v1/posts/{id}/comments",
            post(handlers::create_comment::<R, B>),
        )
        .with_state(state)
}

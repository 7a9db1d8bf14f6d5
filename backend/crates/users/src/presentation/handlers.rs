//! HTTP Handlers

use crate::application::create_user::{CreateUserInput, CreateUserUseCase};
use crate::application::follow_user::{FollowUserUseCase, UnfollowUserUseCase};
use crate::application::get_user::GetUserUseCase;
use crate::domain::entities::{Follow, User};
use crate::domain::repository::{FollowerRepository, UserRepository};
use crate::error::UsersResult;
use crate::presentation::dto::{CreateUserRequest, FollowRequest, UserResponse};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::UserId;
use platform::cache::{CacheBackend, EntityCache};
use std::sync::Arc;

/// Shared state for user handlers
pub struct UsersAppState<R, B> {
    pub repo: Arc<R>,
    pub cache: EntityCache<User, B>,
}

impl<R, B: Clone> Clone for UsersAppState<R, B> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            cache: self.cache.clone(),
        }
    }
}

/// POST /v1/users
pub async fn create_user<R, B>(
    State(state): State<UsersAppState<R, B>>,
    Json(req): Json<CreateUserRequest>,
) -> UsersResult<impl IntoResponse>
where
    R: UserRepository + FollowerRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let user = CreateUserUseCase::new(state.repo.clone())
        .execute(CreateUserInput {
            username: req.username,
            email: req.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /v1/users/{id}
pub async fn get_user<R, B>(
    State(state): State<UsersAppState<R, B>>,
    Path(id): Path<i64>,
) -> UsersResult<Json<UserResponse>>
where
    R: UserRepository + FollowerRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let user = GetUserUseCase::new(state.repo.clone(), state.cache.clone())
        .execute(UserId::new(id))
        .await?;

    Ok(Json(user.into()))
}

/// PUT /v1/users/{id}/follow
pub async fn follow_user<R, B>(
    State(state): State<UsersAppState<R, B>>,
    Path(id): Path<i64>,
    Json(req): Json<FollowRequest>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + FollowerRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    FollowUserUseCase::new(state.repo.clone())
        .execute(Follow {
            user_id: UserId::new(id),
            follower_id: req.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /v1/users/{id}/unfollow
pub async fn unfollow_user<R, B>(
    State(state): State<UsersAppState<R, B>>,
    Path(id): Path<i64>,
    Json(req): Json<FollowRequest>,
) -> UsersResult<StatusCode>
where
    R: UserRepository + FollowerRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    UnfollowUserUseCase::new(state.repo.clone())
        .execute(Follow {
            user_id: UserId::new(id),
            follower_id: req.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

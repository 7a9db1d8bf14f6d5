//! HTTP Handlers

use crate::application::create_comment::{CreateCommentInput, CreateCommentUseCase};
use crate::application::create_post::{CreatePostInput, CreatePostUseCase};
use crate::application::delete_post::DeletePostUseCase;
use crate::application::get_post::GetPostUseCase;
use crate::application::list_comments::ListCommentsUseCase;
use crate::application::update_post::{UpdatePostInput, UpdatePostUseCase};
use crate::domain::entities::Post;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::PostsResult;
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, PostDetailResponse, PostResponse,
    UpdatePostRequest,
};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::PostId;
use platform::cache::{CacheBackend, EntityCache};
use std::sync::Arc;

/// Shared state for post handlers
pub struct PostsAppState<R, B> {
    pub repo: Arc<R>,
    pub cache: EntityCache<Post, B>,
}

impl<R, B: Clone> Clone for PostsAppState<R, B> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            cache: self.cache.clone(),
        }
    }
}

/// POST /v1/posts
pub async fn create_post<R, B>(
    State(state): State<PostsAppState<R, B>>,
    Json(req): Json<CreatePostRequest>,
) -> PostsResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(state.repo.clone());

    let post = use_case
        .execute(CreatePostInput {
            user_id: req.user_id,
            title: req.title,
            content: req.content,
            tags: req.tags,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// GET /v1/posts/{id}
pub async fn get_post<R, B>(
    State(state): State<PostsAppState<R, B>>,
    Path(id): Path<i64>,
) -> PostsResult<Json<PostDetailResponse>>
where
    R: PostRepository + CommentRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let id = PostId::new(id);
    let post = GetPostUseCase::new(state.repo.clone(), state.cache.clone())
        .execute(id)
        .await?;
    let comments = ListCommentsUseCase::new(state.repo.clone())
        .execute(id)
        .await?;

    Ok(Json(PostDetailResponse {
        post: post.into(),
        comments: comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

/// PATCH /v1/posts/{id}
pub async fn update_post<R, B>(
    State(state): State<PostsAppState<R, B>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> PostsResult<Json<PostResponse>>
where
    R: PostRepository + CommentRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let use_case = UpdatePostUseCase::new(state.repo.clone(), state.cache.clone());

    let post = use_case
        .execute(UpdatePostInput {
            id: PostId::new(id),
            version: req.version,
            title: req.title,
            content: req.content,
        })
        .await?;

    Ok(Json(post.into()))
}

/// DELETE /v1/posts/{id}
pub async fn delete_post<R, B>(
    State(state): State<PostsAppState<R, B>>,
    Path(id): Path<i64>,
) -> PostsResult<StatusCode>
where
    R: PostRepository + CommentRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let use_case = DeletePostUseCase::new(state.repo.clone());
    use_case.execute(PostId::new(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/posts/{id}/comments
pub async fn create_comment<R, B>(
    State(state): State<PostsAppState<R, B>>,
    Path(id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> PostsResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Send + Sync + 'static,
    B: CacheBackend + Clone + Send + Sync + 'static,
{
    let comment = CreateCommentUseCase::new(state.repo.clone())
        .execute(CreateCommentInput {
            post_id: PostId::new(id),
            user_id: req.user_id,
            content: req.content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

//! Create Post Use Case

use crate::domain::entities::{NewPost, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{PostContent, PostTitle, normalize_tags};
use crate::error::PostsResult;
use kernel::id::UserId;
use std::sync::Arc;

/// Input DTO for create post
#[derive(Debug, Clone)]
pub struct CreatePostInput {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Create Post Use Case
pub struct CreatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreatePostInput) -> PostsResult<Post> {
        let new_post = NewPost::new(
            input.user_id,
            PostTitle::parse(input.title)?,
            PostContent::parse(input.content)?,
            normalize_tags(input.tags),
        );

        let post = self.repo.create(&new_post).await?;

        tracing::info!(
            post_id = %post.id,
            user_id = %post.user_id,
            "Post created"
        );

        Ok(post)
    }
}

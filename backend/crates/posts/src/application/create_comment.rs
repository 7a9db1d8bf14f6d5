//! Create Comment Use Case

use crate::domain::entities::{Comment, NewComment};
use crate::domain::repository::CommentRepository;
use crate::domain::value_objects::CommentContent;
use crate::error::PostsResult;
use kernel::id::{PostId, UserId};
use std::sync::Arc;

/// Input DTO for create comment
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
}

/// Create Comment Use Case
pub struct CreateCommentUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> CreateCommentUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateCommentInput) -> PostsResult<Comment> {
        let new_comment = NewComment {
            post_id: input.post_id,
            user_id: input.user_id,
            content: CommentContent::parse(input.content)?,
        };

        let comment = self.repo.add_comment(&new_comment).await?;

        tracing::info!(
            comment_id = %comment.id,
            post_id = %comment.post_id,
            user_id = %comment.user_id,
            "Comment created"
        );

        Ok(comment)
    }
}

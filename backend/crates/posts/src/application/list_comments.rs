//! List Comments Use Case
//!
//! Comments are always read from the store; only the post itself is
//! cached.

use crate::domain::entities::Comment;
use crate::domain::repository::CommentRepository;
use crate::error::PostsResult;
use kernel::id::PostId;
use std::sync::Arc;

pub struct ListCommentsUseCase<R>
where
    R: CommentRepository,
{
    repo: Arc<R>,
}

impl<R> ListCommentsUseCase<R>
where
    R: CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: PostId) -> PostsResult<Vec<Comment>> {
        self.repo.comments_for_post(post_id).await
    }
}

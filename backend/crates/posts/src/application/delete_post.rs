//! Delete Post Use Case

use crate::domain::repository::PostRepository;
use crate::error::{PostsError, PostsResult};
use kernel::id::PostId;
use std::sync::Arc;

/// Delete Post Use Case
///
/// The cache is not invalidated; a deleted post may still be served from
/// the cache until its entry expires.
pub struct DeletePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PostId) -> PostsResult<()> {
        if !self.repo.delete(id).await? {
            return Err(PostsError::NotFound);
        }

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

//! Get Post Use Case (cache-aside)

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::{PostsError, PostsResult};
use kernel::id::PostId;
use platform::cache::{CacheBackend, EntityCache};
use std::sync::Arc;

/// Get Post Use Case
///
/// Checks the cache first and falls back to the store on a miss, then
/// populates the cache. Cache failures never fail the read.
pub struct GetPostUseCase<R, B>
where
    R: PostRepository,
    B: CacheBackend + Sync,
{
    repo: Arc<R>,
    cache: EntityCache<Post, B>,
}

impl<R, B> GetPostUseCase<R, B>
where
    R: PostRepository,
    B: CacheBackend + Sync,
{
    pub fn new(repo: Arc<R>, cache: EntityCache<Post, B>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, id: PostId) -> PostsResult<Post> {
        match self.cache.get(&id).await {
            Ok(Some(post)) => {
                tracing::debug!(post_id = %id, "Post cache hit");
                return Ok(post);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, "Post cache read failed, using store");
            }
        }

        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PostsError::NotFound)?;

        if let Err(e) = self.cache.set(&post).await {
            tracing::warn!(post_id = %id, error = %e, "Failed to cache post");
        }

        Ok(post)
    }
}

//! Update Post Use Case
//!
//! Optimistic concurrency: a write only lands if the post still carries
//! the version the caller read. Losing writers get
//! [`PostsError::StaleVersion`] and are expected to re-read and retry.
//!
//! A successful write re-populates the post's cache entry so that the
//! re-read carries the new version.

use crate::domain::entities::{Post, PostChanges, PostEdit, VersionStamp};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{PostContent, PostTitle};
use crate::error::{PostsError, PostsResult};
use kernel::id::PostId;
use platform::cache::{CacheBackend, EntityCache};
use std::sync::Arc;

/// Conditional write on top of a post repository
pub struct OptimisticUpdateGuard<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> OptimisticUpdateGuard<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Persist `edit` if the stored version equals `expected_version`
    ///
    /// A miss is followed by an existence check so a deleted post reports
    /// `NotFound` and a concurrently modified one reports `StaleVersion`.
    pub async fn write(
        &self,
        id: PostId,
        expected_version: i32,
        edit: &PostEdit,
    ) -> PostsResult<VersionStamp> {
        if let Some(stamp) = self
            .repo
            .update_if_version(id, expected_version, edit)
            .await?
        {
            return Ok(stamp);
        }

        if self.repo.exists(id).await? {
            Err(PostsError::StaleVersion {
                post_id: id,
                expected_version,
            })
        } else {
            Err(PostsError::NotFound)
        }
    }

    /// Write the post's current payload, then refresh its version and
    /// `updated_at` from the store
    ///
    /// On failure the post is left untouched.
    pub async fn update(&self, post: &mut Post) -> PostsResult<()> {
        let stamp = self.write(post.id, post.version, &post.edit()).await?;
        post.refresh(stamp);
        Ok(())
    }
}

/// Input DTO for update post
#[derive(Debug, Clone)]
pub struct UpdatePostInput {
    pub id: PostId,
    /// Version the client last read
    pub version: i32,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Update Post Use Case
pub struct UpdatePostUseCase<R, B>
where
    R: PostRepository,
    B: CacheBackend + Sync,
{
    repo: Arc<R>,
    guard: OptimisticUpdateGuard<R>,
    cache: EntityCache<Post, B>,
}

impl<R, B> UpdatePostUseCase<R, B>
where
    R: PostRepository,
    B: CacheBackend + Sync,
{
    pub fn new(repo: Arc<R>, cache: EntityCache<Post, B>) -> Self {
        Self {
            guard: OptimisticUpdateGuard::new(repo.clone()),
            repo,
            cache,
        }
    }

    pub async fn execute(&self, input: UpdatePostInput) -> PostsResult<Post> {
        let changes = PostChanges {
            title: input.title.map(PostTitle::parse).transpose()?,
            content: input.content.map(PostContent::parse).transpose()?,
        };
        if changes.is_empty() {
            return Err(PostsError::Validation(
                "at least one of title or content is required".to_string(),
            ));
        }

        let mut post = self
            .repo
            .find_by_id(input.id)
            .await?
            .ok_or(PostsError::NotFound)?;

        // The client's version, not the one just loaded, decides the race
        post.version = input.version;
        post.apply(changes);
        self.guard.update(&mut post).await?;

        tracing::info!(
            post_id = %post.id,
            version = post.version,
            "Post updated"
        );

        if let Err(e) = self.cache.set(&post).await {
            tracing::warn!(post_id = %post.id, error = %e, "Failed to cache updated post");
        }

        Ok(post)
    }
}

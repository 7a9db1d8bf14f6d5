//! Follow / Unfollow Use Cases
//!
//! The followed user comes from the path and must exist. The follower
//! comes from the payload until requests carry an authenticated caller.

use crate::domain::entities::Follow;
use crate::domain::repository::{FollowerRepository, UserRepository};
use crate::error::{UsersError, UsersResult};
use kernel::id::UserId;
use std::sync::Arc;

async fn ensure_user<R>(repo: &R, id: UserId) -> UsersResult<()>
where
    R: UserRepository,
{
    repo.find_by_id(id)
        .await?
        .map(|_| ())
        .ok_or(UsersError::NotFound)
}

/// Follow User Use Case
pub struct FollowUserUseCase<R>
where
    R: UserRepository + FollowerRepository,
{
    repo: Arc<R>,
}

impl<R> FollowUserUseCase<R>
where
    R: UserRepository + FollowerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, follow: Follow) -> UsersResult<()> {
        if follow.is_self_follow() {
            return Err(UsersError::Validation(
                "a user cannot follow themselves".to_string(),
            ));
        }
        ensure_user(self.repo.as_ref(), follow.user_id).await?;

        FollowerRepository::follow(self.repo.as_ref(), follow).await?;

        tracing::info!(
            user_id = %follow.user_id,
            follower_id = %follow.follower_id,
            "User followed"
        );
        Ok(())
    }
}

/// Unfollow User Use Case
///
/// Unfollowing a user that was not followed succeeds.
pub struct UnfollowUserUseCase<R>
where
    R: UserRepository + FollowerRepository,
{
    repo: Arc<R>,
}

impl<R> UnfollowUserUseCase<R>
where
    R: UserRepository + FollowerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, follow: Follow) -> UsersResult<()> {
        ensure_user(self.repo.as_ref(), follow.user_id).await?;

        let removed = FollowerRepository::unfollow(self.repo.as_ref(), follow).await?;

        tracing::info!(
            user_id = %follow.user_id,
            follower_id = %follow.follower_id,
            removed = removed,
            "User unfollowed"
        );
        Ok(())
    }
}

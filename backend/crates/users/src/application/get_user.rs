//! Get User Use Case (cache-aside)

use crate::domain::entities::User;
use crate::domain::repository::UserRepository;
use crate::error::{UsersError, UsersResult};
use kernel::id::UserId;
use platform::cache::{CacheBackend, EntityCache};
use std::sync::Arc;

/// Get User Use Case
pub struct GetUserUseCase<R, B>
where
    R: UserRepository,
    B: CacheBackend + Sync,
{
    repo: Arc<R>,
    cache: EntityCache<User, B>,
}

impl<R, B> GetUserUseCase<R, B>
where
    R: UserRepository,
    B: CacheBackend + Sync,
{
    pub fn new(repo: Arc<R>, cache: EntityCache<User, B>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, id: UserId) -> UsersResult<User> {
        match self.cache.get(&id).await {
            Ok(Some(user)) => return Ok(user),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "User cache read failed, using store");
            }
        }

        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(UsersError::NotFound)?;

        if let Err(e) = self.cache.set(&user).await {
            tracing::warn!(user_id = %id, error = %e, "Failed to cache user");
        }

        Ok(user)
    }
}

//! Repository Traits

use crate::domain::entities::{Follow, NewUser, User};
use crate::error::UsersResult;
use kernel::id::UserId;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; fails with `UserNameTaken` / `EmailTaken` on duplicates
    async fn create(&self, user: &NewUser) -> UsersResult<User>;

    async fn find_by_id(&self, id: UserId) -> UsersResult<Option<User>>;
}

/// Follower relation repository trait
#[trait_variant::make(FollowerRepository: Send)]
pub trait LocalFollowerRepository {
    /// Record the relation; `AlreadyFollowing` when it exists and
    /// `UnknownFollower` when the follower is not a user
    async fn follow(&self, follow: Follow) -> UsersResult<()>;

    /// `false` when there was no such relation
    async fn unfollow(&self, follow: Follow) -> UsersResult<bool>;
}

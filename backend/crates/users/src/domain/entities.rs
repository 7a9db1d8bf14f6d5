//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::cache::Cacheable;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Email, UserName};

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Cacheable for User {
    const ENTITY: &'static str = "user";
    type Id = UserId;

    fn cache_id(&self) -> Option<UserId> {
        self.id.is_assigned().then_some(self.id)
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: UserName,
    pub email: Email,
}

/// `follower_id` follows `user_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Follow {
    pub user_id: UserId,
    pub follower_id: UserId,
}

impl Follow {
    pub fn is_self_follow(&self) -> bool {
        self.user_id == self.follower_id
    }
}

//! API DTOs (Data Transfer Objects)

use crate::domain::entities::User;
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

/// Request for POST /v1/users
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
}

/// Request for PUT /v1/users/{id}/follow and /unfollow
///
/// `user_id` is the follower.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowRequest {
    pub user_id: UserId,
}

/// Wire form of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

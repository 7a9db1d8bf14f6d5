//! In-memory Repository Implementation

use crate::domain::entities::{Follow, NewUser, User};
use crate::domain::repository::{FollowerRepository, UserRepository};
use crate::error::{UsersError, UsersResult};
use chrono::Utc;
use dashmap::{DashMap, DashSet};
use kernel::id::UserId;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    users: DashMap<UserId, User>,
    // Serializes inserts so the uniqueness check and the insert are atomic
    insert_lock: Mutex<i64>,
    follows: DashSet<Follow>,
    find_calls: AtomicUsize,
}

/// In-memory user repository
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    inner: Arc<Inner>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_id` calls served so far
    pub fn find_calls(&self) -> usize {
        self.inner.find_calls.load(Ordering::SeqCst)
    }

    pub fn is_following(&self, user_id: UserId, follower_id: UserId) -> bool {
        self.inner.follows.contains(&Follow {
            user_id,
            follower_id,
        })
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> UsersResult<User> {
        let mut last_id = self
            .inner
            .insert_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        for existing in self.inner.users.iter() {
            if existing.username == user.username.as_str() {
                return Err(UsersError::UserNameTaken);
            }
            if existing.email == user.email.as_str() {
                return Err(UsersError::EmailTaken);
            }
        }

        *last_id += 1;
        let created = User {
            id: UserId::new(*last_id),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        self.inner.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> UsersResult<Option<User>> {
        self.inner.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.inner.users.get(&id).map(|user| user.clone()))
    }
}

impl FollowerRepository for MemoryUserRepository {
    async fn follow(&self, follow: Follow) -> UsersResult<()> {
        if !self.inner.users.contains_key(&follow.user_id) {
            return Err(UsersError::NotFound);
        }
        if !self.inner.users.contains_key(&follow.follower_id) {
            return Err(UsersError::UnknownFollower);
        }
        if !self.inner.follows.insert(follow) {
            return Err(UsersError::AlreadyFollowing);
        }
        Ok(())
    }

    async fn unfollow(&self, follow: Follow) -> UsersResult<bool> {
        Ok(self.inner.follows.remove(&follow).is_some())
    }
}

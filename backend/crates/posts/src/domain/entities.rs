//! Domain Entities
//!
//! Core business entities for the posts domain.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};
use platform::cache::Cacheable;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CommentContent, PostContent, PostTitle};

/// Post entity
///
/// `version` starts at 0 and is bumped by the store on every successful
/// write. It is also the serialized form kept in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Merge a partial edit into the in-memory copy
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title.into_inner();
        }
        if let Some(content) = changes.content {
            self.content = content.into_inner();
        }
    }

    /// Mutable payload as written by a guarded update
    pub fn edit(&self) -> PostEdit {
        PostEdit {
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }

    /// Adopt the version and timestamp the store assigned to a write
    pub fn refresh(&mut self, stamp: VersionStamp) {
        self.version = stamp.version;
        self.updated_at = stamp.updated_at;
    }
}

impl Cacheable for Post {
    const ENTITY: &'static str = "post";
    type Id = PostId;

    fn cache_id(&self) -> Option<PostId> {
        self.id.is_assigned().then_some(self.id)
    }
}

/// A post that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewPost {
    pub fn new(user_id: UserId, title: PostTitle, content: PostContent, tags: Vec<String>) -> Self {
        Self {
            user_id,
            title: title.into_inner(),
            content: content.into_inner(),
            tags,
        }
    }
}

/// Partial edit; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Full mutable payload of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEdit {
    pub title: String,
    pub content: String,
}

/// Version and timestamp produced by a successful conditional write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionStamp {
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}

/// Comment on a post
///
/// Comments are append-only and listed oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: CommentContent,
}

//! In-memory Repository Implementation
//!
//! Same contract as the PostgreSQL repository, for tests and local runs.

use crate::domain::entities::{Comment, NewComment, NewPost, Post, PostEdit, VersionStamp};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{PostsError, PostsResult};
use chrono::Utc;
use dashmap::DashMap;
use kernel::id::{CommentId, PostId};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct Inner {
    posts: DashMap<PostId, Post>,
    // Insertion order is creation order
    comments: DashMap<PostId, Vec<Comment>>,
    last_id: AtomicI64,
    last_comment_id: AtomicI64,
    find_calls: AtomicUsize,
}

/// In-memory post repository
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostRepository {
    inner: Arc<Inner>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_id` calls served so far
    pub fn find_calls(&self) -> usize {
        self.inner.find_calls.load(Ordering::SeqCst)
    }

    /// Number of stored posts
    pub fn post_count(&self) -> usize {
        self.inner.posts.len()
    }
}

impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: &NewPost) -> PostsResult<Post> {
        let id = PostId::new(self.inner.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = Utc::now();
        let post = Post {
            id,
            user_id: post.user_id,
            title: post.title.clone(),
            content: post.content.clone(),
            tags: post.tags.clone(),
            version: 0,
            created_at: now,
            updated_at: now,
        };

        self.inner.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> PostsResult<Option<Post>> {
        self.inner.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.inner.posts.get(&id).map(|post| post.clone()))
    }

    async fn exists(&self, id: PostId) -> PostsResult<bool> {
        Ok(self.inner.posts.contains_key(&id))
    }

    async fn update_if_version(
        &self,
        id: PostId,
        expected_version: i32,
        edit: &PostEdit,
    ) -> PostsResult<Option<VersionStamp>> {
        // get_mut holds the shard write lock across compare and write
        let Some(mut post) = self.inner.posts.get_mut(&id) else {
            return Ok(None);
        };
        if post.version != expected_version {
            return Ok(None);
        }

        post.title = edit.title.clone();
        post.content = edit.content.clone();
        post.version += 1;
        post.updated_at = Utc::now();

        Ok(Some(VersionStamp {
            version: post.version,
            updated_at: post.updated_at,
        }))
    }

    async fn delete(&self, id: PostId) -> PostsResult<bool> {
        let removed = self.inner.posts.remove(&id).is_some();
        self.inner.comments.remove(&id);
        Ok(removed)
    }
}

impl CommentRepository for MemoryPostRepository {
    async fn add_comment(&self, comment: &NewComment) -> PostsResult<Comment> {
        // The post's shard stays read-locked until the comment is stored,
        // so a concurrent delete cannot leave it orphaned
        let Some(_post) = self.inner.posts.get(&comment.post_id) else {
            return Err(PostsError::NotFound);
        };

        let created = Comment {
            id: CommentId::new(self.inner.last_comment_id.fetch_add(1, Ordering::SeqCst) + 1),
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content.as_str().to_string(),
            created_at: Utc::now(),
        };
        self.inner
            .comments
            .entry(comment.post_id)
            .or_default()
            .push(created.clone());

        Ok(created)
    }

    async fn comments_for_post(&self, post_id: PostId) -> PostsResult<Vec<Comment>> {
        Ok(self
            .inner
            .comments
            .get(&post_id)
            .map(|comments| comments.clone())
            .unwrap_or_default())
    }
}

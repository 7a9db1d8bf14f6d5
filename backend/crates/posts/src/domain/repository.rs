//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entities::{Comment, NewComment, NewPost, Post, PostEdit, VersionStamp};
use crate::error::PostsResult;
use kernel::id::PostId;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Insert a post; the store assigns id, version 0 and timestamps
    async fn create(&self, post: &NewPost) -> PostsResult<Post>;

    async fn find_by_id(&self, id: PostId) -> PostsResult<Option<Post>>;

    async fn exists(&self, id: PostId) -> PostsResult<bool>;

    /// Write `edit` only if the stored version still equals
    /// `expected_version`, bumping it in the same atomic step
    ///
    /// `None` when no row matched, either because the post is gone or
    /// because its version moved on.
    async fn update_if_version(
        &self,
        id: PostId,
        expected_version: i32,
        edit: &PostEdit,
    ) -> PostsResult<Option<VersionStamp>>;

    /// `false` when there was nothing to delete
    async fn delete(&self, id: PostId) -> PostsResult<bool>;
}

/// Comment repository trait
///
/// Deleting a post removes its comments.
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Attach a comment; `NotFound` when the post does not exist
    async fn add_comment(&self, comment: &NewComment) -> PostsResult<Comment>;

    /// Comments of a post, oldest first; empty for an unknown post
    async fn comments_for_post(&self, post_id: PostId) -> PostsResult<Vec<Comment>>;
}

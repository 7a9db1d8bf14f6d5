//! PostgreSQL Repository Implementation

use crate::domain::entities::{Comment, NewComment, NewPost, Post, PostEdit, VersionStamp};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{PostsError, PostsResult};
use chrono::{DateTime, Utc};
use kernel::id::PostId;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;

/// Upper bound for a single query round trip
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

const POST_COLUMNS: &str = "id, user_id, title, content, tags, version, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
    tags: Vec<String>,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id.into(),
            user_id: row.user_id.into(),
            title: row.title,
            content: row.content,
            tags: row.tags,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COMMENT_POST_CONSTRAINT: &str = "comments_post_id_fkey";

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id.into(),
            post_id: row.post_id.into(),
            user_id: row.user_id.into(),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn bounded<T, F>(query: F) -> PostsResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::time::timeout(QUERY_TIMEOUT, query)
        .await
        .map_err(|_| PostsError::Timeout)?
        .map_err(PostsError::from)
}

impl PostRepository for PgPostRepository {
    async fn create(&self, post: &NewPost) -> PostsResult<Post> {
        let sql = format!(
            "INSERT INTO posts (user_id, title, content, tags) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {POST_COLUMNS}"
        );

        let row: PostRow = bounded(
            sqlx::query_as(&sql)
                .bind(post.user_id.get())
                .bind(&post.title)
                .bind(&post.content)
                .bind(&post.tags)
                .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: PostId) -> PostsResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");

        let row: Option<PostRow> = bounded(
            sqlx::query_as(&sql)
                .bind(id.get())
                .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.map(Post::from))
    }

    async fn exists(&self, id: PostId) -> PostsResult<bool> {
        bounded(
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(id.get())
                .fetch_one(&self.pool),
        )
        .await
    }

    async fn update_if_version(
        &self,
        id: PostId,
        expected_version: i32,
        edit: &PostEdit,
    ) -> PostsResult<Option<VersionStamp>> {
        // Compare-and-set in one statement: the row lock taken by UPDATE
        // serializes concurrent writers on the same post
        let row: Option<(i32, DateTime<Utc>)> = bounded(
            sqlx::query_as(
                r#"
                UPDATE posts
                SET title = $1, content = $2, version = version + 1, updated_at = NOW()
                WHERE id = $3 AND version = $4
                RETURNING version, updated_at
                "#,
            )
            .bind(&edit.title)
            .bind(&edit.content)
            .bind(id.get())
            .bind(expected_version)
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.map(|(version, updated_at)| VersionStamp {
            version,
            updated_at,
        }))
    }

    async fn delete(&self, id: PostId) -> PostsResult<bool> {
        let result = bounded(
            sqlx::query("DELETE FROM posts WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// A comment on a missing post violates the post foreign key
fn map_comment_insert_error(err: sqlx::Error) -> PostsError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.constraint() == Some(COMMENT_POST_CONSTRAINT) {
            return PostsError::NotFound;
        }
    }
    PostsError::Database(err)
}

impl CommentRepository for PgPostRepository {
    async fn add_comment(&self, comment: &NewComment) -> PostsResult<Comment> {
        let insert = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at
            "#,
        )
        .bind(comment.post_id.get())
        .bind(comment.user_id.get())
        .bind(comment.content.as_str())
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(QUERY_TIMEOUT, insert)
            .await
            .map_err(|_| PostsError::Timeout)?
            .map_err(map_comment_insert_error)?;

        Ok(row.into())
    }

    async fn comments_for_post(&self, post_id: PostId) -> PostsResult<Vec<Comment>> {
        let rows: Vec<CommentRow> = bounded(
            sqlx::query_as(
                r#"
                SELECT id, post_id, user_id, content, created_at
                FROM comments
                WHERE post_id = $1
                ORDER BY created_at ASC, id ASC
                "#,
            )
            .bind(post_id.get())
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}

//! PostgreSQL Repository Implementation

use crate::domain::entities::{Follow, NewUser, User};
use crate::domain::repository::{FollowerRepository, UserRepository};
use crate::error::{UsersError, UsersResult};
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use std::time::Duration;

const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";
const FOLLOWED_CONSTRAINT: &str = "followers_user_id_fkey";
const FOLLOWER_CONSTRAINT: &str = "followers_follower_id_fkey";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.into(),
            username: row.username,
            email: row.email,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique violations onto the field that collided
fn map_insert_error(err: sqlx::Error) -> UsersError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USERNAME_CONSTRAINT) => return UsersError::UserNameTaken,
                Some(EMAIL_CONSTRAINT) => return UsersError::EmailTaken,
                _ => {}
            }
        }
    }
    UsersError::Database(err)
}

fn map_follow_error(err: sqlx::Error) -> UsersError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return UsersError::AlreadyFollowing;
        }
        match db_err.constraint() {
            Some(FOLLOWED_CONSTRAINT) => return UsersError::NotFound,
            Some(FOLLOWER_CONSTRAINT) => return UsersError::UnknownFollower,
            _ => {}
        }
    }
    UsersError::Database(err)
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> UsersResult<User> {
        let insert = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            RETURNING id, username, email, is_active, created_at
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(QUERY_TIMEOUT, insert)
            .await
            .map_err(|_| UsersError::Timeout)?
            .map_err(map_insert_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: UserId) -> UsersResult<Option<User>> {
        let select = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, is_active, created_at FROM users WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool);

        let row = tokio::time::timeout(QUERY_TIMEOUT, select)
            .await
            .map_err(|_| UsersError::Timeout)??;

        Ok(row.map(User::from))
    }
}

impl FollowerRepository for PgUserRepository {
    async fn follow(&self, follow: Follow) -> UsersResult<()> {
        let insert = sqlx::query("INSERT INTO followers (user_id, follower_id) VALUES ($1, $2)")
            .bind(follow.user_id.get())
            .bind(follow.follower_id.get())
            .execute(&self.pool);

        tokio::time::timeout(QUERY_TIMEOUT, insert)
            .await
            .map_err(|_| UsersError::Timeout)?
            .map_err(map_follow_error)?;

        Ok(())
    }

    async fn unfollow(&self, follow: Follow) -> UsersResult<bool> {
        let delete = sqlx::query("DELETE FROM followers WHERE user_id = $1 AND follower_id = $2")
            .bind(follow.user_id.get())
            .bind(follow.follower_id.get())
            .execute(&self.pool);

        let result = tokio::time::timeout(QUERY_TIMEOUT, delete)
            .await
            .map_err(|_| UsersError::Timeout)??;

        Ok(result.rows_affected() > 0)
    }
}

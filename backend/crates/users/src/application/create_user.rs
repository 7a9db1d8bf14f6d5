//! Create User Use Case

use crate::domain::entities::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_objects::{Email, UserName};
use crate::error::UsersResult;
use std::sync::Arc;

/// Input DTO for create user
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
}

/// Create User Use Case
pub struct CreateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> CreateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateUserInput) -> UsersResult<User> {
        let new_user = NewUser {
            username: UserName::parse(&input.username)?,
            email: Email::parse(&input.email)?,
        };

        let user = self.repo.create(&new_user).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            "User created"
        );

        Ok(user)
    }
}

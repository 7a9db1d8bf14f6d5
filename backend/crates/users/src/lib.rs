//! Users Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User and follow entities, value objects, repository traits
//! - `application/` - Use cases (register, cached lookup, follow, unfollow)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs and router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entities::User;
pub use error::{UsersError, UsersResult};
pub use infra::memory::MemoryUserRepository;
pub use infra::postgres::PgUserRepository;
pub use presentation::router::users_router;

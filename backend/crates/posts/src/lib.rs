//! Posts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post and comment entities, validated value objects, repository traits
//! - `application/` - Use cases (create, cached read, guarded update, delete, comments)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs and router
//!
//! ## Consistency Model
//! - Every post carries a `version` that the store bumps on each write
//! - Updates are conditional on the version the caller read; a lost race
//!   surfaces as a conflict instead of silently overwriting
//! - Reads go through a TTL cache that may serve a snapshot up to one TTL old
//! - Updates made through this service write the new snapshot back to the
//!   cache; deletes and writes from elsewhere are not propagated

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entities::{Comment, Post};
pub use error::{PostsError, PostsResult};
pub use infra::memory::MemoryPostRepository;
pub use infra::postgres::PgPostRepository;
pub use presentation::router::posts_router;

#[cfg(test)]
mod tests;

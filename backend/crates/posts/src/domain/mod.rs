//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Post, NewPost, VersionStamp, Comment)
//! - Domain value objects (PostTitle, PostContent, CommentContent)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;

//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic, the store and the cache.

pub mod create_comment;
pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_comments;
pub mod update_post;

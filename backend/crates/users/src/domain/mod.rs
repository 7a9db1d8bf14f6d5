//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (User, NewUser, Follow)
//! - Domain value objects (UserName, Email)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;

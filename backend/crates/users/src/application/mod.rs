//! Application Layer - Use Cases

pub mod create_user;
pub mod follow_user;
pub mod get_user;

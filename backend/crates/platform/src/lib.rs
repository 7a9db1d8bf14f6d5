//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification from proxy headers
//! - Admission control (fixed-window rate limiting) and its middleware
//! - Typed read-through cache over Redis or memory

pub mod cache;
pub mod client;
pub mod middleware;
pub mod rate_limit;

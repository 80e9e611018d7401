//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (bcrypt, 72-byte input limit applied explicitly)
//! - Stateless access tokens (HS256 JWT)
//! - Sliding-window rate limiting with an injected clock
//! - Plain-text sanitization for user-supplied fields
//! - Client source-address extraction

pub mod client;
pub mod password;
pub mod rate_limit;
pub mod sanitize;
pub mod token;

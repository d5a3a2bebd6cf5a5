//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (IP, User-Agent, Referer)
//! - Cryptographic utilities (HMAC-SHA256, Base64URL)
//! - Password hashing (Argon2id)
//! - Sliding-window rate limiting and the submission throttle
//! - Input sanitizing and format checks for public forms

pub mod client;
pub mod crypto;
pub mod password;
pub mod rate_limit;
pub mod sanitize;

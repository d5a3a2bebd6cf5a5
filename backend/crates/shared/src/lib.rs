//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary every feature crate agrees on:
//! - Common error types and result aliases
//! - Typed record identifiers
//! - The acting staff member (`Actor`) and staff roles
//!
//! Only things with a consistent meaning across leads, testimonials,
//! users, audit logs and analytics belong here.

pub mod actor;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;

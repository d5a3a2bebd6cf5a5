//! Domain Layer

pub mod entity;
pub mod filter;

pub use entity::{AuditAction, AuditEntry, AuditLog, resource};
pub use filter::AuditFilter;

//! Presentation Layer
//!
//! HTTP handlers, DTOs, router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AuditAppState;
pub use router::{audit_log_router, audit_resource_router};

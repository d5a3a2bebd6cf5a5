//! Audit trail
//!
//! Append-only record of staff actions (lead changes, moderation, user
//! management, sign-ins). Other feature crates record entries through
//! [`RecordAuditUseCase`]; super admins browse the trail over HTTP.
//!
//! - `domain/` - `AuditLog`, `AuditAction`, query filters
//! - `application/` - record and query use cases
//! - `presentation/` - DTOs, handlers, routers

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

pub use application::{QueryAuditLogsUseCase, RecordAuditUseCase};
pub use domain::{AuditAction, AuditEntry, AuditFilter, AuditLog, resource};
pub use error::{AuditError, AuditResult};
pub use presentation::router::{audit_log_router, audit_resource_router};

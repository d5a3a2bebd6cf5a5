//! Application Layer
//!
//! Use cases and application services.

pub mod query_logs;
pub mod record_entry;

// Re-exports
pub use query_logs::QueryAuditLogsUseCase;
pub use record_entry::RecordAuditUseCase;

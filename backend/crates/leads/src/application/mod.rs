//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod manage_leads;
pub mod submit_lead;

// Re-exports
pub use manage_leads::ManageLeadsUseCase;
pub use submit_lead::SubmitLeadUseCase;

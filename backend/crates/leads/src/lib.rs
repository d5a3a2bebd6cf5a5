//! Leads Backend Module
//!
//! Public loan-application intake and the admin workflow around it.
//!
//! - `domain/` - Lead entity, statuses, form validation
//! - `application/` - Submission (throttled) and admin use cases
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Submissions pass the shared [`SubmissionThrottle`](platform::rate_limit::SubmissionThrottle)
//! twice, keyed by `phone:<number>` and `ip:<address>`, before anything is
//! written.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{DuplicatePolicy, LeadsConfig};
pub use application::{ManageLeadsUseCase, SubmitLeadUseCase};
pub use domain::{ApplicationStatus, Lead, LeadForm, LeadPatch, LoanType};
pub use error::{LeadError, LeadResult};
pub use presentation::handlers::LeadsAppState;
pub use presentation::router::{leads_admin_router, leads_public_router};

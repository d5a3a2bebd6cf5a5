//! Domain Layer

pub mod entity;
pub mod form;

pub use entity::{ApplicationStatus, Lead, LoanType};
pub use form::{FormErrors, LeadForm, LeadPatch};

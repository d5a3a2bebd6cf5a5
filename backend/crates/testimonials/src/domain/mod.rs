//! Domain Layer

pub mod entity;
pub mod form;

pub use entity::{ModeratorLogEntry, SYSTEM_MODERATOR, Testimonial, TestimonialStatus};
pub use form::TestimonialForm;

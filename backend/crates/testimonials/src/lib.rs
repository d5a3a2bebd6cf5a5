//! Testimonials Backend Module
//!
//! Customer testimonials: public submission, public listing of approved
//! entries, and staff moderation with a per-testimonial moderator log.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::{ListTestimonialsUseCase, ModerateTestimonialUseCase, SubmitTestimonialUseCase};
pub use domain::{ModeratorLogEntry, Testimonial, TestimonialForm, TestimonialStatus};
pub use error::{TestimonialError, TestimonialResult};
pub use presentation::router::{testimonials_admin_router, testimonials_public_router};
pub use presentation::handlers::TestimonialsAppState;

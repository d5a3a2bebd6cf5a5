//! Application Layer
//!
//! Use cases and application services.

pub mod list_testimonials;
pub mod moderate_testimonial;
pub mod submit_testimonial;

// Re-exports
pub use list_testimonials::ListTestimonialsUseCase;
pub use moderate_testimonial::ModerateTestimonialUseCase;
pub use submit_testimonial::SubmitTestimonialUseCase;

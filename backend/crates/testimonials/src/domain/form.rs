//! Testimonial form validation

use platform::sanitize::sanitize_text;

pub const NAME_LENGTH: (usize, usize) = (2, 100);
pub const MESSAGE_LENGTH: (usize, usize) = (10, 1000);
pub const RATING_RANGE: (u8, u8) = (1, 5);

/// A public testimonial submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestimonialForm {
    pub name: String,
    pub message: String,
    pub rating: Option<u8>,
}

fn length_check(errors: &mut Vec<String>, field: &str, value: &str, (min, max): (usize, usize)) {
    let len = value.chars().count();
    if len == 0 {
        errors.push(format!("{field} should not be empty"));
    } else if len < min {
        errors.push(format!("{field} must be longer than or equal to {min} characters"));
    } else if len > max {
        errors.push(format!("{field} must be shorter than or equal to {max} characters"));
    }
}

impl TestimonialForm {
    /// Trim, HTML-escape and check lengths; errors are joined for display
    pub fn validated(self) -> Result<Self, Vec<String>> {
        let form = Self {
            name: sanitize_text(&self.name),
            message: sanitize_text(&self.message),
            rating: self.rating,
        };

        let mut errors = Vec::new();
        length_check(&mut errors, "name", &form.name, NAME_LENGTH);
        length_check(&mut errors, "message", &form.message, MESSAGE_LENGTH);
        if form
            .rating
            .is_some_and(|r| r < RATING_RANGE.0 || r > RATING_RANGE.1)
        {
            errors.push("rating must be between 1 and 5".to_string());
        }

        if errors.is_empty() { Ok(form) } else { Err(errors) }
    }
}

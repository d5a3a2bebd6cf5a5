//! Domain Layer
//!
//! Staff users, access tokens and the repository seam.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

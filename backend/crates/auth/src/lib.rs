//! Staff Authentication Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Staff users, value objects, access tokens, repository trait
//! - `application/` - Use cases and configuration
//! - `infra/` - Repository implementation over the document store
//! - `presentation/` - HTTP handlers, DTOs, role guard, routers
//!
//! ## Features
//! - Username + password sign-in issuing signed bearer tokens
//! - Role guard middleware that puts the authenticated [`Actor`] in request
//!   extensions for the other feature crates
//! - SuperAdmin user management
//! - Super admin seeding on an empty users collection
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Tokens are `base64url(claims).base64url(HMAC-SHA256)`, stateless
//! - Inactive users cannot sign in

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthenticateUseCase, SeedSuperAdminUseCase};
pub use domain::entity::user::StaffUser;
pub use error::{AuthError, AuthResult};
pub use infra::user_store::UserStore;
pub use presentation::middleware::{RoleGuard, require_role};
pub use presentation::router::{auth_router, users_router};

pub use kernel::actor::{Actor, StaffRole};

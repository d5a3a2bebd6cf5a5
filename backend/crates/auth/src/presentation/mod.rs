//! Presentation Layer
//!
//! HTTP handlers, DTOs, the role guard and routers.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

//! Analytics Backend Module
//!
//! Anonymous page-view tracking and the traffic figures shown on the
//! staff dashboard.

pub mod application;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::{TrackPageViewUseCase, TrafficStatsUseCase};
pub use domain::{DailyCount, PageView, TrafficOverview};
pub use error::{AnalyticsError, AnalyticsResult};
pub use presentation::router::{analytics_admin_router, analytics_public_router};
pub use presentation::handlers::AnalyticsAppState;

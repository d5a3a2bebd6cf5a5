//! Domain Layer

pub mod entity;
pub mod stats;

pub use entity::PageView;
pub use stats::{DAILY_STATS_DAYS, DailyCount, TrafficOverview, UNIQUE_VISITOR_DAYS};

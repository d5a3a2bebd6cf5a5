//! Application Layer

pub mod stats;
pub mod track;

pub use stats::TrafficStatsUseCase;
pub use track::TrackPageViewUseCase;

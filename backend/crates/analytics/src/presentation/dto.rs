//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// `POST /api/analytics/track` body
#[derive(Debug, Clone, Deserialize)]
pub struct TrackRequest {
    #[serde(default)]
    pub page: String,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct TotalViewsResponse {
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct TodayViewsResponse {
    pub today: usize,
}

#[derive(Debug, Serialize)]
pub struct UniqueVisitorsResponse {
    pub unique: usize,
}

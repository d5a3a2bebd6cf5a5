//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use platform::client::ClientInfo;
use store::DocumentStore;

use crate::application::{TrackPageViewUseCase, TrafficStatsUseCase};
use crate::domain::{DailyCount, TrafficOverview};
use crate::error::AnalyticsResult;
use crate::presentation::dto::{
    TodayViewsResponse, TotalViewsResponse, TrackRequest, TrackResponse, UniqueVisitorsResponse,
};

pub struct AnalyticsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
}

impl<S> AnalyticsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn stats(&self) -> TrafficStatsUseCase<S> {
        TrafficStatsUseCase::new(self.store.clone())
    }
}

impl<S> Clone for AnalyticsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

/// POST /api/analytics/track
pub async fn track<S>(
    State(state): State<AnalyticsAppState<S>>,
    client: ClientInfo,
    Json(req): Json<TrackRequest>,
) -> AnalyticsResult<Json<TrackResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    TrackPageViewUseCase::new(state.store.clone())
        .execute(&req.page, &client)
        .await?;
    Ok(Json(TrackResponse { success: true }))
}

/// GET /api/analytics/daily-stats
pub async fn daily_stats<S>(
    State(state): State<AnalyticsAppState<S>>,
) -> AnalyticsResult<Json<Vec<DailyCount>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Ok(Json(state.stats().daily_stats(Utc::now()).await?))
}

/// GET /api/analytics/total-views
pub async fn total_views<S>(
    State(state): State<AnalyticsAppState<S>>,
) -> AnalyticsResult<Json<TotalViewsResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let total = state.stats().total_views().await?;
    Ok(Json(TotalViewsResponse { total }))
}

/// GET /api/analytics/today-views
pub async fn today_views<S>(
    State(state): State<AnalyticsAppState<S>>,
) -> AnalyticsResult<Json<TodayViewsResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let today = state.stats().today_views(Utc::now()).await?;
    Ok(Json(TodayViewsResponse { today }))
}

/// GET /api/analytics/unique-visitors
pub async fn unique_visitors<S>(
    State(state): State<AnalyticsAppState<S>>,
) -> AnalyticsResult<Json<UniqueVisitorsResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let unique = state.stats().unique_visitors(Utc::now()).await?;
    Ok(Json(UniqueVisitorsResponse { unique }))
}

/// GET /api/analytics/overview
pub async fn overview<S>(
    State(state): State<AnalyticsAppState<S>>,
) -> AnalyticsResult<Json<TrafficOverview>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    Ok(Json(state.stats().overview(Utc::now()).await?))
}

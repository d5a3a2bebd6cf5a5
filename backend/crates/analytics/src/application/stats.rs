//! Traffic Stats Use Case
//!
//! Loads the page-view collection once per call and folds it with the
//! functions in [`crate::domain::stats`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use store::{DocumentStore, collections};

use crate::domain::stats::{self, DAILY_STATS_DAYS, UNIQUE_VISITOR_DAYS};
use crate::domain::{DailyCount, PageView, TrafficOverview};
use crate::error::AnalyticsResult;

pub struct TrafficStatsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> TrafficStatsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn views(&self) -> AnalyticsResult<Vec<PageView>> {
        Ok(self.store.find_all(collections::PAGE_VIEWS).await?)
    }

    pub async fn daily_stats(&self, now: DateTime<Utc>) -> AnalyticsResult<Vec<DailyCount>> {
        Ok(stats::daily_counts(&self.views().await?, now, DAILY_STATS_DAYS))
    }

    pub async fn total_views(&self) -> AnalyticsResult<usize> {
        Ok(self.views().await?.len())
    }

    pub async fn today_views(&self, now: DateTime<Utc>) -> AnalyticsResult<usize> {
        Ok(stats::today_views(&self.views().await?, now))
    }

    pub async fn unique_visitors(&self, now: DateTime<Utc>) -> AnalyticsResult<usize> {
        Ok(stats::unique_visitors(&self.views().await?, now, UNIQUE_VISITOR_DAYS))
    }

    pub async fn overview(&self, now: DateTime<Utc>) -> AnalyticsResult<TrafficOverview> {
        Ok(stats::overview(&self.views().await?, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use platform::client::ClientInfo;
    use store::JsonFileStore;

    #[tokio::test]
    async fn test_figures_agree_with_overview() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let client = ClientInfo {
            ip: Some("192.0.2.1".parse().unwrap()),
            ..Default::default()
        };
        for offset in [0, 1, 30] {
            let view = PageView::new("/".into(), &client, now - Duration::days(offset));
            store.create(collections::PAGE_VIEWS, view).await.unwrap();
        }

        let use_case = TrafficStatsUseCase::new(store);
        let overview = use_case.overview(now).await.unwrap();
        assert_eq!(overview.total_views, use_case.total_views().await.unwrap());
        assert_eq!(overview.total_views, 3);
        assert_eq!(overview.today_views, use_case.today_views(now).await.unwrap());
        assert_eq!(overview.today_views, 1);
        assert_eq!(overview.unique_visitors, 1);
        assert_eq!(overview.daily_stats, use_case.daily_stats(now).await.unwrap());
        assert_eq!(overview.daily_stats.iter().map(|d| d.count).sum::<usize>(), 2);
    }
}

//! Traffic statistics
//!
//! Pure folds over page views. Day boundaries are UTC midnights and every
//! function takes `now` so results are reproducible.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::entity::PageView;

pub const DAILY_STATS_DAYS: u32 = 14;
pub const UNIQUE_VISITOR_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficOverview {
    pub total_views: usize,
    pub today_views: usize,
    pub unique_visitors: usize,
    pub daily_stats: Vec<DailyCount>,
}

/// UTC midnight `days_back` days before `now`'s date
pub fn midnight(now: DateTime<Utc>, days_back: u32) -> DateTime<Utc> {
    let date = now.date_naive() - Duration::days(i64::from(days_back));
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Views since today's UTC midnight
pub fn today_views(views: &[PageView], now: DateTime<Utc>) -> usize {
    let start = midnight(now, 0);
    views.iter().filter(|v| v.viewed_at >= start).count()
}

/// Distinct known IPs since midnight `days` days ago
pub fn unique_visitors(views: &[PageView], now: DateTime<Utc>, days: u32) -> usize {
    let start = midnight(now, days);
    views
        .iter()
        .filter(|v| v.viewed_at >= start)
        .filter_map(|v| v.ip_address.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

/// One entry per day for the last `days` days (today included), oldest
/// first, with empty days reported as zero
pub fn daily_counts(views: &[PageView], now: DateTime<Utc>, days: u32) -> Vec<DailyCount> {
    let today = now.date_naive();
    let first = today - Duration::days(i64::from(days.saturating_sub(1)));

    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for view in views {
        let date = view.viewed_at.date_naive();
        if date >= first && date <= today {
            *counts.entry(date).or_default() += 1;
        }
    }

    first
        .iter_days()
        .take(days as usize)
        .map(|date| DailyCount {
            date: date.format("%Y-%m-%d").to_string(),
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

pub fn overview(views: &[PageView], now: DateTime<Utc>) -> TrafficOverview {
    TrafficOverview {
        total_views: views.len(),
        today_views: today_views(views, now),
        unique_visitors: unique_visitors(views, now, UNIQUE_VISITOR_DAYS),
        daily_stats: daily_counts(views, now, DAILY_STATS_DAYS),
    }
}

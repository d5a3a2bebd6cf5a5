//! Track Page View Use Case

use std::sync::Arc;

use chrono::Utc;
use platform::client::ClientInfo;
use store::{DocumentStore, collections};

use crate::domain::PageView;
use crate::domain::entity::MAX_PAGE_LENGTH;
use crate::error::{AnalyticsError, AnalyticsResult};

pub struct TrackPageViewUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> TrackPageViewUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, page: &str, client: &ClientInfo) -> AnalyticsResult<PageView> {
        let page = page.trim();
        if page.is_empty() {
            return Err(AnalyticsError::Validation("page should not be empty".to_string()));
        }
        if page.chars().count() > MAX_PAGE_LENGTH {
            return Err(AnalyticsError::Validation(format!(
                "page must be shorter than or equal to {MAX_PAGE_LENGTH} characters"
            )));
        }

        let view = self
            .store
            .create(
                collections::PAGE_VIEWS,
                PageView::new(page.to_string(), client, Utc::now()),
            )
            .await?;

        tracing::debug!(page = %view.page, "Page view tracked");
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::JsonFileStore;

    #[tokio::test]
    async fn test_track_records_client() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let client = ClientInfo {
            ip: Some("203.0.113.7".parse().unwrap()),
            user_agent: Some("Mozilla/5.0".into()),
            referer: None,
        };

        let view = TrackPageViewUseCase::new(store.clone())
            .execute(" /apply ", &client)
            .await
            .unwrap();
        assert_eq!(view.page, "/apply");
        assert_eq!(view.ip_address.as_deref(), Some("203.0.113.7"));

        let stored: Vec<PageView> = store.find_all(collections::PAGE_VIEWS).await.unwrap();
        assert_eq!(stored, vec![view]);
    }

    #[tokio::test]
    async fn test_rejects_blank_page() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let err = TrackPageViewUseCase::new(store)
            .execute("  ", &ClientInfo::default())
            .await
            .unwrap_err();
        assert_eq!(err.error_key(), "validation_error");
    }
}

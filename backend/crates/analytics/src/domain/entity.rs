//! Page View Entity

use chrono::{DateTime, Utc};
use kernel::id::PageViewId;
use platform::client::ClientInfo;
use serde::{Deserialize, Serialize};
use store::Record;

/// Longest accepted page path
pub const MAX_PAGE_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub id: PageViewId,
    pub page: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referer: Option<String>,
    pub viewed_at: DateTime<Utc>,
}

impl Record for PageView {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl PageView {
    pub fn new(page: String, client: &ClientInfo, viewed_at: DateTime<Utc>) -> Self {
        Self {
            id: PageViewId::new(),
            page,
            ip_address: client.ip_string(),
            user_agent: client.user_agent.clone(),
            referer: client.referer.clone(),
            viewed_at,
        }
    }
}

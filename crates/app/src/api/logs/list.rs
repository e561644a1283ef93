use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ListLogsRequest {
    /// Maximum number of entries
    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    /// Entries to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Only entries of this action type
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long = "type")]
    pub action_type: Option<String>,
}

impl Default for ListLogsRequest {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
            action_type: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub user_id: Option<u64>,
    pub action_type: String,
    pub ip_address: Option<String>,
    pub status: String,
    #[serde(default)]
    pub details: Option<String>,
    pub created_at: String,
    /// Only present for admins, who see every user's entries
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLogsResponse {
    pub logs: Vec<LogEntry>,
    pub limit: u32,
    pub offset: u32,
}

impl ApiRequest for ListLogsRequest {
    type Response = ListLogsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["logs"])?;
        Ok(client.get(full_url).query(&self))
    }
}

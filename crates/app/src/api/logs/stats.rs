use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogStatsRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCount {
    pub action_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogStatsResponse {
    pub total_logs: u64,
    #[serde(default)]
    pub by_status: Vec<StatusCount>,
    #[serde(default)]
    pub by_action: Vec<ActionCount>,
    pub recent_24h: u64,
}

impl ApiRequest for LogStatsRequest {
    type Response = LogStatsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["logs", "stats"])?;
        Ok(client.get(full_url))
    }
}

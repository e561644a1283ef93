use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemStatsRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatsResponse {
    pub total_commands: u64,
    pub successful: u64,
    pub failed: u64,
    pub recent_24h: u64,
}

impl ApiRequest for SystemStatsRequest {
    type Response = SystemStatsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["system", "stats"])?;
        Ok(client.get(full_url))
    }
}

use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct ExecuteRequest {
    /// Command line to run; must start with an allowed command
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub call_id: u64,
    pub command: String,
    #[serde(default)]
    pub output: String,
    pub status: String,
    pub return_code: i32,
}

impl ApiRequest for ExecuteRequest {
    type Response = ExecuteResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["system", "execute"])?;
        Ok(client.post(full_url).json(&self))
    }
}

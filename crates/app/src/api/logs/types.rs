use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogTypesRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogTypesResponse {
    pub types: Vec<String>,
}

impl ApiRequest for LogTypesRequest {
    type Response = LogTypesResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["logs", "types"])?;
        Ok(client.get(full_url))
    }
}

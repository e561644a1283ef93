use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowedCommandsRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowedCommandsResponse {
    pub commands: Vec<String>,
}

impl ApiRequest for AllowedCommandsRequest {
    type Response = AllowedCommandsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["system", "allowed-commands"])?;
        Ok(client.get(full_url))
    }
}

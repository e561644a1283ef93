use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::permissions::FileDescriptor;

use crate::api::client::{endpoint, ApiError, ApiRequest};

/// List every file in the sandbox with its permissions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub files: Vec<FileDescriptor>,
}

impl ApiRequest for ListRequest {
    type Response = ListResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", ""])?;
        Ok(client.get(full_url))
    }
}

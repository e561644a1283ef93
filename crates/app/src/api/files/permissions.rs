use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::permissions::PermissionSet;

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct PermissionsRequest {
    /// File to look up
    pub filename: String,
}

impl ApiRequest for PermissionsRequest {
    type Response = PermissionSet;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", "permissions", &self.filename])?;
        Ok(client.get(full_url))
    }
}

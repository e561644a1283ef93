use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

/// Permanently delete one recycled file
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct PurgeRequest {
    /// Internal name of the recycled file, as shown by `bin ls`
    pub internal_name: String,
}

impl ApiRequest for PurgeRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["recycle-bin", "delete", &self.internal_name])?;
        Ok(client.delete(full_url))
    }
}

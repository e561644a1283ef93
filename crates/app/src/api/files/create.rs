use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CreateRequest {
    /// Name of the new file
    pub filename: String,

    /// Initial text content
    #[arg(long, default_value = "")]
    pub content: String,
}

impl ApiRequest for CreateRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", ""])?;
        Ok(client.post(full_url).json(&self))
    }
}

use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::permissions::PermissionSet;

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecycledRequest;

/// A deleted file waiting out its retention window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecycledFile {
    /// Name the file had before deletion
    pub name: String,
    /// Name to pass to restore and purge
    pub internal_name: String,
    pub size: u64,
    /// Unix seconds
    pub deleted_at: f64,
    #[serde(default)]
    pub deleted_by: Option<u64>,
    /// Seconds until the file is purged automatically
    pub time_remaining: u64,
    #[serde(default)]
    pub original_permissions: PermissionSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecycledResponse {
    pub files: Vec<RecycledFile>,
}

impl ApiRequest for ListRecycledRequest {
    type Response = ListRecycledResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["recycle-bin", ""])?;
        Ok(client.get(full_url))
    }
}

use reqwest::{Client, RequestBuilder, Url};

use common::session::Passcode;

use crate::api::client::{endpoint, with_passcode, ApiError, ApiRequest};

/// Fetch the raw bytes of a file. Send with [`ApiClient::call_raw`].
///
/// [`ApiClient::call_raw`]: crate::api::client::ApiClient::call_raw
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub filename: String,
    pub passcode: Option<Passcode>,
}

impl ApiRequest for DownloadRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", "download", &self.filename])?;
        Ok(with_passcode(client.get(full_url), self.passcode.as_ref()))
    }
}

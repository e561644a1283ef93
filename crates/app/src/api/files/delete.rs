use reqwest::{Client, RequestBuilder, Url};

use common::session::Passcode;

use crate::api::client::{endpoint, with_passcode, ApiError, ApiRequest};

/// Move a file to the recycle bin
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub filename: String,
    pub passcode: Option<Passcode>,
}

impl ApiRequest for DeleteRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", &self.filename])?;
        Ok(with_passcode(client.delete(full_url), self.passcode.as_ref()))
    }
}

use reqwest::{Client, RequestBuilder, Url};

use common::access::FileContent;
use common::session::Passcode;

use crate::api::client::{endpoint, with_passcode, ApiError, ApiRequest};

#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub filename: String,
    pub passcode: Option<Passcode>,
}

impl ApiRequest for ReadRequest {
    type Response = FileContent;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", &self.filename])?;
        Ok(with_passcode(client.get(full_url), self.passcode.as_ref()))
    }
}

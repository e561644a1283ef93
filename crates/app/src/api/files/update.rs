use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;

use common::session::Passcode;

use crate::api::client::{endpoint, with_passcode, ApiError, ApiRequest};

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub filename: String,
    pub content: String,
    pub passcode: Option<Passcode>,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    content: &'a str,
}

impl ApiRequest for UpdateRequest {
    type Response = ();

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", &self.filename])?;
        let builder = client.put(full_url).json(&UpdateBody {
            content: &self.content,
        });
        Ok(with_passcode(builder, self.passcode.as_ref()))
    }
}

#[allow(clippy::module_inception)]
mod client;
mod envelope;
mod error;

pub use client::ApiClient;
pub use envelope::{Envelope, Failure};
pub use error::ApiError;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use common::session::Passcode;

/// Header carrying a file-lock passcode, kept out of the request body.
pub const PASSCODE_HEADER: &str = "X-File-Passcode";

pub trait ApiRequest {
    /// Type of the envelope's `data` field on success
    type Response: DeserializeOwned;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError>;
}

/// Append `segments` to the base URL's path, percent-encoding each one.
///
/// An empty trailing segment yields a trailing slash.
pub fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidBase(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Attach the passcode header when there is a passcode to send.
pub fn with_passcode(builder: RequestBuilder, passcode: Option<&Passcode>) -> RequestBuilder {
    match passcode {
        Some(passcode) => builder.header(PASSCODE_HEADER, passcode.as_str()),
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_file_names() {
        let base = Url::parse("http://localhost:5000/api").unwrap();
        let url = endpoint(&base, &["files", "q3 report#1.txt"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/files/q3%20report%231.txt"
        );
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let base = Url::parse("http://localhost:5000/api/").unwrap();
        let url = endpoint(&base, &["files", ""]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/files/");
    }

    #[test]
    fn test_endpoint_rejects_non_base_urls() {
        let base = Url::parse("mailto:ops@example.com").unwrap();
        assert!(matches!(
            endpoint(&base, &["files"]),
            Err(ApiError::InvalidBase(_))
        ));
    }
}

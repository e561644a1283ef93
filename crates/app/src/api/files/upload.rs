use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::permissions::PermissionSet;
use common::session::Passcode;

use crate::api::client::{endpoint, ApiError, ApiRequest};

/// Capability bits sent with an upload. All four are always stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPermissions {
    pub view: bool,
    pub download: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Default for UploadPermissions {
    fn default() -> Self {
        Self {
            view: true,
            download: true,
            edit: false,
            delete: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub data: Bytes,
    /// Encrypt at rest with this passcode
    pub encrypt: Option<Passcode>,
    /// Lock the file behind this passcode
    pub applock: Option<Passcode>,
    pub permissions: UploadPermissions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default)]
    pub permissions: PermissionSet,
    #[serde(default)]
    pub locked: bool,
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

impl ApiRequest for UploadRequest {
    type Response = UploadResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["files", "upload"])?;

        let mime = mime_guess::from_path(&self.filename).first_or_octet_stream();
        let part = Part::bytes(self.data.to_vec())
            .file_name(self.filename.clone())
            .mime_str(mime.as_ref())?;

        let passcode = self
            .encrypt
            .as_ref()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();
        let applock_passcode = self
            .applock
            .as_ref()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();

        let form = Form::new()
            .part("file", part)
            .text("encrypt", flag(self.encrypt.is_some()))
            .text("passcode", passcode)
            .text("permissions", serde_json::to_string(&self.permissions)?)
            .text("applock", flag(self.applock.is_some()))
            .text("applock_passcode", applock_passcode);

        Ok(client.post(full_url).multipart(form))
    }
}

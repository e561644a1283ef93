use reqwest::StatusCode;

use common::access::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("invalid API base URL: {0}")]
    InvalidBase(String),
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not authenticated: {0}")]
    Unauthorized(String),
    /// The file is locked and the passcode was missing or wrong.
    #[error("{0}")]
    Locked(String),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
}

impl ApiError {
    pub fn is_locked(&self) -> bool {
        matches!(self, ApiError::Locked(_))
    }

    /// The backend's own message for rejected requests, the full error otherwise.
    pub fn message(&self) -> String {
        match self {
            ApiError::Locked(msg) | ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::HttpStatus(_, msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    pub fn into_backend_error(self) -> BackendError {
        match self {
            ApiError::Locked(msg) => BackendError::locked(msg),
            other => BackendError::other(other.message()),
        }
    }
}

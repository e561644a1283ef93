use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use reqwest::{header::HeaderMap, header::HeaderValue, Client, Response, StatusCode};
use url::Url;

use super::envelope::{Envelope, Failure};
use super::error::ApiError;
use super::ApiRequest;

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub remote: Url,
    client: Client,
    token: Option<String>,
    /// Set once the backend answers 401, so the caller can drop the session
    unauthorized: Arc<AtomicBool>,
}

impl ApiClient {
    pub fn new(remote: &Url) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            remote: remote.clone(),
            client,
            token: None,
            unauthorized: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let (data, _) = self.call_with_message(request).await?;
        Ok(data)
    }

    /// Like [`call`](Self::call), also returning the envelope's `message`.
    pub async fn call_with_message<T: ApiRequest>(
        &self,
        request: T,
    ) -> Result<(T::Response, Option<String>), ApiError> {
        let response = self.send(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope: Envelope<T::Response> = serde_json::from_slice(&body)?;
        if !envelope.success {
            let message = envelope
                .message
                .clone()
                .unwrap_or_else(|| "request failed".to_string());
            return Err(ApiError::HttpStatus(status, message));
        }
        let message = envelope.message.clone();
        Ok((envelope.into_data()?, message))
    }

    /// Send `request` and return the raw response body, for endpoints that
    /// stream file bytes instead of a JSON envelope.
    pub async fn call_raw<T: ApiRequest>(&self, request: T) -> Result<Bytes, ApiError> {
        let response = self.send(request).await?;
        Ok(response.bytes().await?)
    }

    /// Whether any request so far was rejected as unauthenticated.
    pub fn session_rejected(&self) -> bool {
        self.unauthorized.load(Ordering::Relaxed)
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }

    /// Get the underlying HTTP client for custom requests
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    async fn send<T: ApiRequest>(&self, request: T) -> Result<Response, ApiError> {
        let mut request_builder = request.build_request(&self.remote, &self.client)?;
        if let Some(token) = &self.token {
            request_builder = request_builder.bearer_auth(token);
        }
        let response = request_builder.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let failure: Failure = serde_json::from_str(&text).unwrap_or_default();
        let message = failure
            .error
            .clone()
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| fallback_message(status, &text));
        tracing::debug!(%status, locked = failure.is_locked(), "request rejected: {}", message);

        if failure.is_locked() {
            return Err(ApiError::Locked(message));
        }
        if status == StatusCode::UNAUTHORIZED {
            self.unauthorized.store(true, Ordering::Relaxed);
            return Err(ApiError::Unauthorized(message));
        }
        Err(ApiError::HttpStatus(status, message))
    }
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() || body.starts_with('<') {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

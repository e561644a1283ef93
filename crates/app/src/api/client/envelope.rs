use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ApiError;

/// Body of every JSON response: `{success, message, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// The payload. Endpoints that answer with `data: null` can still be read
    /// into types that accept null, such as `()`.
    pub fn into_data(self) -> Result<T, ApiError> {
        match self.data {
            Some(data) => Ok(data),
            None => Ok(T::deserialize(serde_json::Value::Null)?),
        }
    }
}

/// Body of a failed response: `{success: false, error, data?}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Failure {
    pub error: Option<String>,
    pub data: Option<FailureData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureData {
    #[serde(default)]
    pub locked: bool,
}

impl Failure {
    pub fn is_locked(&self) -> bool {
        self.data.as_ref().map(|d| d.locked).unwrap_or(false)
    }
}

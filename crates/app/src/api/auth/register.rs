use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::permissions::Role;
use common::session::User;

use crate::api::client::{endpoint, ApiError, ApiRequest};

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl ApiRequest for RegisterRequest {
    /// The created account; the backend reports its id as `user_id`
    type Response = User;

    fn build_request(self, base_url: &Url, client: &Client) -> Result<RequestBuilder, ApiError> {
        let full_url = endpoint(base_url, &["auth", "register"])?;
        Ok(client.post(full_url).json(&self))
    }
}

use clap::Args;

use vaultdash::api::auth::login::LoginRequest;
use vaultdash::api::client::ApiError;
use vaultdash::state::{StateError, StoredSession};

#[derive(Args, Debug, Clone)]
pub struct Login {
    pub username: String,

    /// Password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("failed to read password: {0}")]
    Io(#[from] std::io::Error),
    #[error("login cancelled")]
    Cancelled,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Login {
    type Error = LoginError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = ctx.state_or_init()?;

        let password = match &self.password {
            Some(password) => password.clone(),
            None => ctx
                .terminal
                .read_line("Password: ")
                .await?
                .ok_or(LoginError::Cancelled)?,
        };

        let response = ctx
            .client
            .call(LoginRequest {
                username: self.username.clone(),
                password,
            })
            .await?;

        let user = response.user;
        let output = format!("Logged in as {} ({})", user.username, user.role);
        tracing::info!(username = %user.username, role = %user.role, "logged in");

        state.save_session(&StoredSession {
            token: response.token,
            user,
        })?;
        Ok(output)
    }
}

use clap::Args;

use common::permissions::Role;
use vaultdash::api::auth::register::RegisterRequest;
use vaultdash::api::client::ApiError;

#[derive(Args, Debug, Clone)]
pub struct Register {
    pub username: String,

    #[arg(long)]
    pub email: String,

    /// Password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Account role: user or admin
    #[arg(long, default_value = "user")]
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("failed to read password: {0}")]
    Io(#[from] std::io::Error),
    #[error("registration cancelled")]
    Cancelled,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Register {
    type Error = RegisterError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => ctx
                .terminal
                .read_line("Password: ")
                .await?
                .ok_or(RegisterError::Cancelled)?,
        };

        let user = ctx
            .client
            .call(RegisterRequest {
                username: self.username.clone(),
                email: self.email.clone(),
                password,
                role: self.role,
            })
            .await?;

        Ok(format!(
            "Registered {} ({}), user id {}. Run 'vaultdash login {}' to sign in",
            user.username, user.role, user.id, user.username
        ))
    }
}

use clap::Args;

use vaultdash::api::auth::logout::LogoutRequest;
use vaultdash::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Logout;

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("state error: {0}")]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Logout {
    type Error = LogoutError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let Ok(session) = ctx.session() else {
            return Ok("Not logged in".to_string());
        };

        // the local session goes away even if the backend is unreachable
        if let Err(e) = ctx.client.call(LogoutRequest).await {
            tracing::warn!(error = %e, "backend logout failed");
        }
        session.end();

        let state = AppState::load(ctx.config_path.clone())?;
        state.clear_session()?;

        Ok(format!("Logged out {}", session.user().username))
    }
}

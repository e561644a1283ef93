use std::path::PathBuf;

use clap::Args;
use url::Url;

use common::access::PermissionFallback;
use vaultdash::state::{AppConfig, AppState, DEFAULT_API_URL};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Backend API base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Default log level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,

    /// Also write logs to daily files in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Allow view and download when the permission lookup fails
    #[arg(long)]
    pub fail_open: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] vaultdash::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            api_url: self.api_url.to_string(),
            log_level: self.log_level.to_string().to_lowercase(),
            log_dir: self.log_dir.clone(),
            permission_fallback: if self.fail_open {
                PermissionFallback::FailOpen
            } else {
                PermissionFallback::FailClosed
            },
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let log_dir = match &state.config.log_dir {
            Some(dir) => dir.display().to_string(),
            None => "stderr only".to_string(),
        };

        let output = format!(
            "Initialized vaultdash directory at: {}\n\
             - Config: {}\n\
             - API URL: {}\n\
             - Log level: {}\n\
             - Log directory: {}\n\
             - Permission lookup failures: {:?}",
            state.state_dir.display(),
            state.config_path.display(),
            state.config.api_url,
            state.config.log_level,
            log_dir,
            state.config.permission_fallback,
        );

        Ok(output)
    }
}

use clap::{Args, Subcommand};

pub mod allowed;
pub mod exec;
pub mod history;
pub mod stats;

use vaultdash::api::system::execute::ExecuteRequest;
use vaultdash::api::system::history::HistoryRequest;

use crate::cli::op::Op;

crate::command_enum! {
    (Exec, ExecuteRequest),
    (History, HistoryRequest),
    (Allowed, allowed::Allowed),
    (Stats, stats::Stats),
}

pub type SysCommand = Command;

/// Run allow-listed system commands on the backend host
#[derive(Args, Debug, Clone)]
pub struct Sys {
    #[command(subcommand)]
    pub command: SysCommand,
}

#[async_trait::async_trait]
impl Op for Sys {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SysError {
    #[error("API error: {0}")]
    Api(#[from] vaultdash::api::client::ApiError),
    #[error("command is required")]
    MissingCommand,
}

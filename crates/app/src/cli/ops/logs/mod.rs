use clap::{Args, Subcommand};

pub mod ls;
pub mod stats;
pub mod types;

use vaultdash::api::logs::list::ListLogsRequest;

use crate::cli::op::Op;

crate::command_enum! {
    (Ls, ListLogsRequest),
    (Types, types::Types),
    (Stats, stats::Stats),
}

pub type LogsCommand = Command;

/// Audit log of logins, file actions and commands
#[derive(Args, Debug, Clone)]
pub struct Logs {
    #[command(subcommand)]
    pub command: LogsCommand,
}

#[async_trait::async_trait]
impl Op for Logs {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LogsError {
    #[error("API error: {0}")]
    Api(#[from] vaultdash::api::client::ApiError),
}

use clap::{Args, Subcommand};

pub mod empty;
pub mod ls;
pub mod purge;
pub mod restore;

use vaultdash::api::recycle_bin::purge::PurgeRequest;
use vaultdash::api::recycle_bin::restore::RestoreRequest;

use crate::cli::op::Op;

crate::command_enum! {
    (Ls, ls::Ls),
    (Restore, RestoreRequest),
    (Purge, PurgeRequest),
    (Empty, empty::Empty),
}

pub type BinCommand = Command;

/// Recycle bin: deleted files are kept for 30 minutes
#[derive(Args, Debug, Clone)]
pub struct Bin {
    #[command(subcommand)]
    pub command: BinCommand,
}

#[async_trait::async_trait]
impl Op for Bin {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BinError {
    #[error("API error: {0}")]
    Api(#[from] vaultdash::api::client::ApiError),
}

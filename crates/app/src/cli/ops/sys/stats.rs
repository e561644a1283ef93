use clap::Args;

use vaultdash::api::system::stats::SystemStatsRequest;

use super::SysError;

#[derive(Args, Debug, Clone)]
pub struct Stats;

#[async_trait::async_trait]
impl crate::cli::op::Op for Stats {
    type Error = SysError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let stats = ctx.client.call(SystemStatsRequest).await?;
        Ok(format!(
            "Total commands: {}\nSuccessful: {}\nFailed: {}\nLast 24 hours: {}",
            stats.total_commands, stats.successful, stats.failed, stats.recent_24h
        ))
    }
}

use clap::Args;

use vaultdash::api::logs::stats::LogStatsRequest;

use super::LogsError;

#[derive(Args, Debug, Clone)]
pub struct Stats;

#[async_trait::async_trait]
impl crate::cli::op::Op for Stats {
    type Error = LogsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let stats = ctx.client.call(LogStatsRequest).await?;

        let mut lines = vec![
            format!("Total entries: {}", stats.total_logs),
            format!("Last 24 hours: {}", stats.recent_24h),
            "By status:".to_string(),
        ];
        lines.extend(
            stats
                .by_status
                .iter()
                .map(|s| format!("  {:<24}{}", s.status, s.count)),
        );
        lines.push("By action:".to_string());
        lines.extend(
            stats
                .by_action
                .iter()
                .map(|a| format!("  {:<24}{}", a.action_type, a.count)),
        );
        Ok(lines.join("\n"))
    }
}

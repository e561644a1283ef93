use vaultdash::api::system::history::HistoryRequest;

use super::SysError;

#[async_trait::async_trait]
impl crate::cli::op::Op for HistoryRequest {
    type Error = SysError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(self.clone()).await?;

        if response.history.is_empty() {
            return Ok("No commands executed yet".to_string());
        }
        let output = response
            .history
            .iter()
            .map(|entry| {
                format!(
                    "{} {:<8} {}",
                    entry.executed_at, entry.status, entry.command
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(output)
    }
}

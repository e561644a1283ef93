use vaultdash::api::recycle_bin::purge::PurgeRequest;

use super::BinError;

#[async_trait::async_trait]
impl crate::cli::op::Op for PurgeRequest {
    type Error = BinError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let ((), message) = ctx.client.call_with_message(self.clone()).await?;
        Ok(message.unwrap_or_else(|| format!("Permanently deleted {}", self.internal_name)))
    }
}

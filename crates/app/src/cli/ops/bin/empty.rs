use clap::Args;

use vaultdash::api::recycle_bin::empty::EmptyBinRequest;

use super::BinError;

/// Permanently delete everything in the recycle bin
#[derive(Args, Debug, Clone)]
pub struct Empty;

#[async_trait::async_trait]
impl crate::cli::op::Op for Empty {
    type Error = BinError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let ((), message) = ctx.client.call_with_message(EmptyBinRequest).await?;
        Ok(message.unwrap_or_else(|| "Recycle bin emptied".to_string()))
    }
}

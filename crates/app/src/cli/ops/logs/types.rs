use clap::Args;

use vaultdash::api::logs::types::LogTypesRequest;

use super::LogsError;

/// Action types that appear in the log
#[derive(Args, Debug, Clone)]
pub struct Types;

#[async_trait::async_trait]
impl crate::cli::op::Op for Types {
    type Error = LogsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(LogTypesRequest).await?;
        Ok(response.types.join("\n"))
    }
}

use clap::Args;

use vaultdash::api::system::allowed::AllowedCommandsRequest;

use super::SysError;

/// Commands the backend will run
#[derive(Args, Debug, Clone)]
pub struct Allowed;

#[async_trait::async_trait]
impl crate::cli::op::Op for Allowed {
    type Error = SysError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(AllowedCommandsRequest).await?;
        Ok(response.commands.join("\n"))
    }
}

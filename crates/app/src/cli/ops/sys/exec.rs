use vaultdash::api::system::execute::ExecuteRequest;

use super::SysError;

#[async_trait::async_trait]
impl crate::cli::op::Op for ExecuteRequest {
    type Error = SysError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let command = self.command.trim();
        if command.is_empty() {
            return Err(SysError::MissingCommand);
        }
        let response = ctx
            .client
            .call(ExecuteRequest {
                command: command.to_string(),
            })
            .await?;

        tracing::debug!(call_id = response.call_id, status = %response.status, "command executed");
        Ok(format!(
            "$ {}\n{}\n[{}, exit code {}]",
            response.command,
            response.output.trim_end(),
            response.status,
            response.return_code
        ))
    }
}

use vaultdash::api::client::ApiError;
use vaultdash::api::files::create::CreateRequest;

#[derive(Debug, thiserror::Error)]
pub enum FilesCreateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("file name is required")]
    MissingName,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for CreateRequest {
    type Error = FilesCreateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if self.filename.trim().is_empty() {
            return Err(FilesCreateError::MissingName);
        }
        let ((), message) = ctx.client.call_with_message(self.clone()).await?;

        Ok(message.unwrap_or_else(|| format!("Created {}", self.filename)))
    }
}

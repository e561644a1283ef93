use clap::Args;

use common::access::{AccessController, GuardedRequest, OperationOutput};

use super::{settle, FileAccessError, CANCELLED};

#[derive(Args, Debug, Clone)]
pub struct View {
    /// File to display
    pub filename: String,
}

impl View {
    pub async fn run(&self, controller: &AccessController) -> Result<String, FileAccessError> {
        let result = controller.perform(GuardedRequest::View, &self.filename).await;
        match settle(result)? {
            None => Ok(CANCELLED.to_string()),
            Some(OperationOutput::Viewed(file)) => Ok(file.content),
            Some(_) => Err(FileAccessError::UnexpectedOutput(self.filename.clone())),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for View {
    type Error = FileAccessError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let controller = ctx.controller()?;
        self.run(&controller).await
    }
}

use clap::Args;

use common::access::{AccessController, GuardedRequest, OperationOutput};

use super::{settle, FileAccessError, CANCELLED};

/// Move a file to the recycle bin
#[derive(Args, Debug, Clone)]
pub struct Rm {
    pub filename: String,
}

impl Rm {
    pub async fn run(&self, controller: &AccessController) -> Result<String, FileAccessError> {
        let result = controller
            .perform(GuardedRequest::Delete, &self.filename)
            .await;
        match settle(result)? {
            None => Ok(CANCELLED.to_string()),
            Some(OperationOutput::Deleted) => {
                Ok(format!("Moved {} to the recycle bin", self.filename))
            }
            Some(_) => Err(FileAccessError::UnexpectedOutput(self.filename.clone())),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = FileAccessError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let controller = ctx.controller()?;
        self.run(&controller).await
    }
}

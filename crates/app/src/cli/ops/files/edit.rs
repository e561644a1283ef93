use std::path::PathBuf;

use clap::Args;

use common::access::{AccessController, GuardedRequest, OperationOutput};

use super::{settle, FileAccessError, CANCELLED};

#[derive(Args, Debug, Clone)]
pub struct Edit {
    /// File to overwrite
    pub filename: String,

    /// New content
    #[arg(long, conflicts_with = "from_file", required_unless_present = "from_file")]
    pub content: Option<String>,

    /// Read the new content from a local file
    #[arg(long)]
    pub from_file: Option<PathBuf>,
}

impl Edit {
    async fn content(&self) -> Result<String, FileAccessError> {
        match (&self.content, &self.from_file) {
            (Some(content), _) => Ok(content.clone()),
            (None, Some(path)) => Ok(tokio::fs::read_to_string(path).await?),
            (None, None) => Ok(String::new()),
        }
    }

    pub async fn run(&self, controller: &AccessController) -> Result<String, FileAccessError> {
        let content = self.content().await?;
        let result = controller
            .perform(GuardedRequest::Edit { content }, &self.filename)
            .await;
        match settle(result)? {
            None => Ok(CANCELLED.to_string()),
            Some(OperationOutput::Edited) => Ok(format!("Updated {}", self.filename)),
            Some(_) => Err(FileAccessError::UnexpectedOutput(self.filename.clone())),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Edit {
    type Error = FileAccessError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let controller = ctx.controller()?;
        self.run(&controller).await
    }
}

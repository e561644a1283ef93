use std::path::{Path, PathBuf};

use clap::Args;

use common::access::{AccessController, GuardedRequest, OperationOutput};
use vaultdash::render::format_bytes;

use super::{settle, FileAccessError, CANCELLED};

#[derive(Args, Debug, Clone)]
pub struct Download {
    /// File to download
    pub filename: String,

    /// Where to write it (defaults to the last component of the file name,
    /// in the current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Download {
    fn destination(&self) -> Result<PathBuf, FileAccessError> {
        if let Some(output) = &self.output {
            return Ok(output.clone());
        }
        Path::new(&self.filename)
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| FileAccessError::NoLocalName(self.filename.clone()))
    }

    pub async fn run(&self, controller: &AccessController) -> Result<String, FileAccessError> {
        let destination = self.destination()?;
        let result = controller
            .perform(GuardedRequest::Download, &self.filename)
            .await;
        match settle(result)? {
            None => Ok(CANCELLED.to_string()),
            Some(OperationOutput::Downloaded(bytes)) => {
                tokio::fs::write(&destination, &bytes).await?;
                Ok(format!(
                    "Downloaded {} ({}) to {}",
                    self.filename,
                    format_bytes(bytes.len() as u64),
                    destination.display()
                ))
            }
            Some(_) => Err(FileAccessError::UnexpectedOutput(self.filename.clone())),
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Download {
    type Error = FileAccessError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let controller = ctx.controller()?;
        self.run(&controller).await
    }
}

use clap::{Args, Subcommand};

pub mod create;
pub mod download;
pub mod edit;
pub mod ls;
pub mod perms;
pub mod rm;
pub mod upload;
pub mod view;

use common::access::{AccessError, OperationOutput};
use vaultdash::api::files::create::CreateRequest;
use vaultdash::api::files::permissions::PermissionsRequest;

use crate::cli::op::{NotLoggedIn, Op};

crate::command_enum! {
    (Ls, ls::Ls),
    (Create, CreateRequest),
    (Upload, upload::Upload),
    (View, view::View),
    (Edit, edit::Edit),
    (Rm, rm::Rm),
    (Download, download::Download),
    (Perms, PermissionsRequest),
}

pub type FilesCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Files {
    #[command(subcommand)]
    pub command: FilesCommand,
}

#[async_trait::async_trait]
impl Op for Files {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

pub const CANCELLED: &str = "Cancelled";

/// Errors from operations that go through the access controller
#[derive(Debug, thiserror::Error)]
pub enum FileAccessError {
    #[error(transparent)]
    NotLoggedIn(#[from] NotLoggedIn),
    #[error("{0}")]
    Access(#[from] AccessError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected result for {0}")]
    UnexpectedOutput(String),
    #[error("cannot derive a local file name from {0:?}, pass --output")]
    NoLocalName(String),
}

/// A cancelled challenge is not an error for the caller: it yields `None`.
pub(crate) fn settle(
    result: Result<OperationOutput, AccessError>,
) -> Result<Option<OperationOutput>, FileAccessError> {
    match result {
        Ok(output) => Ok(Some(output)),
        Err(AccessError::Cancelled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

//! # Locked-file access
//!
//! Every view, edit, delete and download of a file goes through the
//! [`AccessController`]. For one call it walks:
//!
//! ```text
//! CHECKING_PERMISSION --denied--> DENIED
//!        |
//!   CHECKING_LOCK --unlocked / cached passcode--> EXECUTING
//!        |                                          |   ^
//!        +--------------> AWAITING_PASSCODE <--locked   |
//!                          |   |                        |
//!                  cancel  |   +----- non-empty --------+
//!                          v
//!                      CANCELLED        EXECUTING --ok--> SUCCESS
//!                                       EXECUTING --other error--> FAILED
//! ```
//!
//! Permission is always checked before the lock, so a user without the
//! capability never learns that a lock exists.
//!
//! The controller talks to three collaborators:
//! - [`PermissionQuery`]: capability bits and lock state for one file
//! - [`FileOperations`]: the actual read/update/delete/download
//! - [`Challenge`]: the passcode prompt, serialized through a [`ChallengeSlot`]

mod challenge;
mod controller;
mod error;
mod operation;

pub use challenge::{
    Challenge, ChallengeNotice, ChallengeRequest, ChallengeResponse, ChallengeSlot,
};
pub use controller::{AccessController, PermissionFallback};
pub use error::{AccessError, BackendError, BackendErrorKind, PermissionQueryError};
pub use operation::{FileContent, GuardedRequest, OperationOutput};

use crate::permissions::PermissionSet;
use crate::session::Passcode;

#[async_trait::async_trait]
pub trait PermissionQuery: Send + Sync {
    async fn permissions(&self, file_name: &str) -> Result<PermissionSet, PermissionQueryError>;
}

/// The backend file operation family.
///
/// The passcode, when present, travels out of band from the request body.
#[async_trait::async_trait]
pub trait FileOperations: Send + Sync {
    async fn execute(
        &self,
        file_name: &str,
        request: &GuardedRequest,
        passcode: Option<&Passcode>,
    ) -> Result<OperationOutput, BackendError>;
}

use crate::permissions::OperationKind;

/// Outcome of a guarded operation that did not succeed.
///
/// A wrong passcode is not an error here: it sends the flow back to the
/// challenge and only ever surfaces as a [`ChallengeNotice`](super::ChallengeNotice).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("permission denied: you do not have permission to {kind} {file_name}")]
    PermissionDenied {
        kind: OperationKind,
        file_name: String,
    },
    #[error("cancelled")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
}

impl AccessError {
    /// Only genuine backend failures belong on the error display path.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, AccessError::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// The file is locked and the passcode was wrong or missing.
    Locked,
    Other,
}

/// Structured failure from a [`FileOperations`](super::FileOperations) call.
///
/// `kind` is decided by the backend's response, never by inspecting `message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn locked(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::Locked,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: BackendErrorKind::Other,
            message: message.into(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.kind == BackendErrorKind::Locked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("permission query failed: {0}")]
pub struct PermissionQueryError(pub String);

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::permissions::OperationKind;

/// A file operation waiting to pass through the access controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardedRequest {
    View,
    Edit { content: String },
    Delete,
    Download,
}

impl GuardedRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            GuardedRequest::View => OperationKind::View,
            GuardedRequest::Edit { .. } => OperationKind::Edit,
            GuardedRequest::Delete => OperationKind::Delete,
            GuardedRequest::Download => OperationKind::Download,
        }
    }
}

/// Text content of a file as returned by the read endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub filename: String,
    pub content: String,
    /// Binary files come back as a placeholder message in `content`
    #[serde(default)]
    pub is_binary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutput {
    Viewed(FileContent),
    Edited,
    Deleted,
    Downloaded(Bytes),
}

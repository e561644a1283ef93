use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::access::{
    BackendError, FileContent, FileOperations, GuardedRequest, OperationOutput, PermissionQuery,
    PermissionQueryError,
};
use crate::permissions::PermissionSet;
use crate::session::Passcode;

#[derive(Debug, Clone)]
pub struct FakeFile {
    pub permissions: PermissionSet,
    pub passcode: Option<String>,
    pub content: String,
}

/// A file backend held in memory that enforces passcode locks the way the
/// real service does: a locked file rejects any request without the right
/// passcode with a `locked` error.
///
/// Capability bits are only reported, not enforced.
#[derive(Debug, Default)]
pub struct FakeBackend {
    files: Mutex<HashMap<String, FakeFile>>,
    fail_permission_queries: Mutex<Option<String>>,
    fail_operations: Mutex<Option<String>>,
    permission_queries: AtomicUsize,
    operation_calls: AtomicUsize,
    passcodes_seen: Mutex<Vec<Option<String>>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_file(&self, name: &str, content: &str, permissions: PermissionSet) {
        self.files.lock().insert(
            name.to_string(),
            FakeFile {
                permissions,
                passcode: None,
                content: content.to_string(),
            },
        );
    }

    pub fn add_locked_file(&self, name: &str, content: &str, passcode: &str) {
        self.add_locked_file_with(name, content, passcode, PermissionSet::default());
    }

    pub fn add_locked_file_with(
        &self,
        name: &str,
        content: &str,
        passcode: &str,
        permissions: PermissionSet,
    ) {
        self.files.lock().insert(
            name.to_string(),
            FakeFile {
                permissions: permissions.locked(),
                passcode: Some(passcode.to_string()),
                content: content.to_string(),
            },
        );
    }

    /// Change a locked file's passcode, leaving any cached copy stale.
    pub fn rotate_passcode(&self, name: &str, passcode: &str) {
        if let Some(file) = self.files.lock().get_mut(name) {
            file.passcode = Some(passcode.to_string());
        }
    }

    /// Make every permission query fail with `message`.
    pub fn fail_permission_queries(&self, message: &str) {
        *self.fail_permission_queries.lock() = Some(message.to_string());
    }

    /// Make every file operation fail with a non-lock error.
    pub fn fail_operations(&self, message: &str) {
        *self.fail_operations.lock() = Some(message.to_string());
    }

    pub fn file(&self, name: &str) -> Option<FakeFile> {
        self.files.lock().get(name).cloned()
    }

    pub fn permission_queries(&self) -> usize {
        self.permission_queries.load(Ordering::SeqCst)
    }

    pub fn operation_calls(&self) -> usize {
        self.operation_calls.load(Ordering::SeqCst)
    }

    /// Passcode attached to each file operation call, in order.
    pub fn passcodes_seen(&self) -> Vec<Option<String>> {
        self.passcodes_seen.lock().clone()
    }
}

#[async_trait::async_trait]
impl PermissionQuery for FakeBackend {
    async fn permissions(&self, file_name: &str) -> Result<PermissionSet, PermissionQueryError> {
        self.permission_queries.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.fail_permission_queries.lock().clone() {
            return Err(PermissionQueryError(message));
        }
        Ok(self
            .files
            .lock()
            .get(file_name)
            .map(|f| f.permissions.clone())
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl FileOperations for FakeBackend {
    async fn execute(
        &self,
        file_name: &str,
        request: &GuardedRequest,
        passcode: Option<&Passcode>,
    ) -> Result<OperationOutput, BackendError> {
        self.operation_calls.fetch_add(1, Ordering::SeqCst);
        self.passcodes_seen
            .lock()
            .push(passcode.map(|p| p.as_str().to_string()));

        if let Some(message) = self.fail_operations.lock().clone() {
            return Err(BackendError::other(message));
        }

        let mut files = self.files.lock();
        let file = files
            .get_mut(file_name)
            .ok_or_else(|| BackendError::other("File not found."))?;

        if file.permissions.is_locked {
            let supplied = passcode.map(Passcode::as_str);
            if supplied.is_none() || supplied != file.passcode.as_deref() {
                return Err(BackendError::locked("File is locked. Passcode required."));
            }
        }

        match request {
            GuardedRequest::View => Ok(OperationOutput::Viewed(FileContent {
                filename: file_name.to_string(),
                content: file.content.clone(),
                is_binary: false,
            })),
            GuardedRequest::Edit { content } => {
                file.content = content.clone();
                Ok(OperationOutput::Edited)
            }
            GuardedRequest::Delete => {
                files.remove(file_name);
                Ok(OperationOutput::Deleted)
            }
            GuardedRequest::Download => Ok(OperationOutput::Downloaded(Bytes::from(
                file.content.clone().into_bytes(),
            ))),
        }
    }
}

use common::access::{
    BackendError, FileOperations, GuardedRequest, OperationOutput, PermissionQuery,
    PermissionQueryError,
};
use common::permissions::PermissionSet;
use common::session::Passcode;

use crate::api::client::ApiClient;
use crate::api::files::delete::DeleteRequest;
use crate::api::files::download::DownloadRequest;
use crate::api::files::permissions::PermissionsRequest;
use crate::api::files::read::ReadRequest;
use crate::api::files::update::UpdateRequest;

/// The dashboard backend as seen by the access controller.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: ApiClient,
}

impl HttpBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl PermissionQuery for HttpBackend {
    async fn permissions(&self, file_name: &str) -> Result<PermissionSet, PermissionQueryError> {
        let request = PermissionsRequest {
            filename: file_name.to_string(),
        };
        self.client
            .call(request)
            .await
            .map_err(|e| PermissionQueryError(e.message()))
    }
}

#[async_trait::async_trait]
impl FileOperations for HttpBackend {
    async fn execute(
        &self,
        file_name: &str,
        request: &GuardedRequest,
        passcode: Option<&Passcode>,
    ) -> Result<OperationOutput, BackendError> {
        let filename = file_name.to_string();
        let passcode = passcode.cloned();

        let result = match request {
            GuardedRequest::View => self
                .client
                .call(ReadRequest { filename, passcode })
                .await
                .map(OperationOutput::Viewed),
            GuardedRequest::Edit { content } => self
                .client
                .call(UpdateRequest {
                    filename,
                    content: content.clone(),
                    passcode,
                })
                .await
                .map(|()| OperationOutput::Edited),
            GuardedRequest::Delete => self
                .client
                .call(DeleteRequest { filename, passcode })
                .await
                .map(|()| OperationOutput::Deleted),
            GuardedRequest::Download => self
                .client
                .call_raw(DownloadRequest { filename, passcode })
                .await
                .map(OperationOutput::Downloaded),
        };

        result.map_err(|e| e.into_backend_error())
    }
}

use vaultdash::api::client::ApiError;
use vaultdash::api::files::permissions::PermissionsRequest;

use common::permissions::OperationKind;

#[derive(Debug, thiserror::Error)]
pub enum FilesPermsError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for PermissionsRequest {
    type Error = FilesPermsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let permissions = ctx.client.call(self.clone()).await?;

        let mut lines = vec![format!("{}:", self.filename)];
        for kind in [
            OperationKind::View,
            OperationKind::Download,
            OperationKind::Edit,
            OperationKind::Delete,
        ] {
            let state = match permissions.capability(kind) {
                Some(true) => "allowed".to_string(),
                Some(false) => "denied".to_string(),
                None if kind.permissive_by_default() => "allowed (default)".to_string(),
                None => "denied (default)".to_string(),
            };
            lines.push(format!("  {:<9}{}", kind, state));
        }
        lines.push(format!(
            "  {:<9}{}",
            "locked",
            if permissions.is_locked { "yes" } else { "no" }
        ));
        if let Some(owner) = permissions.owner {
            lines.push(format!("  {:<9}{}", "owner", owner));
        }

        Ok(lines.join("\n"))
    }
}

use clap::Args;

use vaultdash::api::client::ApiError;
use vaultdash::api::files::list::ListRequest;
use vaultdash::render::{render_file_list, sort_files, SortField, SortOrder};

use crate::cli::op::NotLoggedIn;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Sort by this field
    #[arg(long, value_enum, default_value_t = SortField::Date)]
    pub sort: SortField,

    /// Sort direction (dates default to newest first, others to ascending)
    #[arg(long, value_enum)]
    pub order: Option<SortOrder>,
}

#[derive(Debug, thiserror::Error)]
pub enum FilesLsError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    NotLoggedIn(#[from] NotLoggedIn),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = FilesLsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let role = ctx.session()?.role();
        let mut files = ctx.client.call(ListRequest).await?.files;

        let order = self.order.unwrap_or_else(|| self.sort.default_order());
        sort_files(&mut files, self.sort, order);

        Ok(render_file_list(&files, role))
    }
}

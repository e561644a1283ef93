use clap::Args;

use crate::cli::op::NotLoggedIn;

#[derive(Args, Debug, Clone)]
pub struct Whoami;

#[async_trait::async_trait]
impl crate::cli::op::Op for Whoami {
    type Error = NotLoggedIn;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let user = ctx.session()?.user();
        let email = user
            .email
            .as_deref()
            .map(|e| format!(" <{}>", e))
            .unwrap_or_default();
        Ok(format!(
            "{}{} ({}, id {})",
            user.username, email, user.role, user.id
        ))
    }
}

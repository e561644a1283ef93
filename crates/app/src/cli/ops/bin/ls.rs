use clap::Args;

use vaultdash::api::recycle_bin::list::ListRecycledRequest;
use vaultdash::render::{format_bytes, format_timestamp};

use super::BinError;

#[derive(Args, Debug, Clone)]
pub struct Ls;

fn format_remaining(seconds: u64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = BinError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(ListRecycledRequest).await?;

        if response.files.is_empty() {
            return Ok("Recycle bin is empty".to_string());
        }

        let output = response
            .files
            .iter()
            .map(|file| {
                format!(
                    "{} [{}] {} deleted {} (purged in {})",
                    file.name,
                    file.internal_name,
                    format_bytes(file.size),
                    format_timestamp(file.deleted_at),
                    format_remaining(file.time_remaining)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(1800), "30m 00s");
        assert_eq!(format_remaining(61), "1m 01s");
        assert_eq!(format_remaining(0), "0m 00s");
    }
}

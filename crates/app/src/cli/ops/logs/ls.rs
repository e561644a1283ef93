use vaultdash::api::logs::list::{ListLogsRequest, LogEntry};

use super::LogsError;

fn format_entry(entry: &LogEntry) -> String {
    let who = entry
        .username
        .clone()
        .or_else(|| entry.user_id.map(|id| format!("user {}", id)))
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "{} {:<8} {:<24} {} from {}",
        entry.created_at,
        entry.status,
        entry.action_type,
        who,
        entry.ip_address.as_deref().unwrap_or("-"),
    );
    if let Some(details) = entry.details.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(": ");
        line.push_str(details);
    }
    line
}

#[async_trait::async_trait]
impl crate::cli::op::Op for ListLogsRequest {
    type Error = LogsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(self.clone()).await?;

        if response.logs.is_empty() {
            return Ok("No log entries found".to_string());
        }
        let output = response
            .logs
            .iter()
            .map(format_entry)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(output)
    }
}

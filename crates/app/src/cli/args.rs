pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "vaultdash")]
#[command(about = "Command-line dashboard for files, audit logs and system commands")]
pub struct Args {
    /// Backend API base URL (defaults to the configured api_url)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the vaultdash config directory (defaults to ~/.vaultdash)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level when RUST_LOG is not set (defaults to the configured level)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: crate::Command,
}

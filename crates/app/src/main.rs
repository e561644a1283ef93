// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{
    args::Args, op::Op, Bin, Files, Init, Login, Logout, Logs, Register, Shell, Sys, Version,
    Whoami,
};

use vaultdash::logging::init_logging;
use vaultdash::state::AppState;

command_enum! {
    (Init, Init),
    (Login, Login),
    (Register, Register),
    (Logout, Logout),
    (Whoami, Whoami),
    (Files, Files),
    (Bin, Bin),
    (Logs, Logs),
    (Sys, Sys),
    (Shell, Shell),
    (Version, Version),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Missing state is fine here: `init` creates it, and the defaults apply until then
    let state = AppState::load(args.config_path.clone()).ok();
    let config = state.as_ref().map(|s| s.config.clone()).unwrap_or_default();

    let level = args.log_level.unwrap_or_else(|| config.log_level());
    let guards = init_logging(level, config.log_dir.as_deref());

    let stored = match state.as_ref().map(|s| s.load_session()).transpose() {
        Ok(stored) => stored.flatten(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable session file");
            None
        }
    };

    // Resolve remote URL: explicit flag > config api_url > hardcoded default
    let remote = cli::op::resolve_remote(args.remote, state.as_ref());

    // Build context - always has API client initialized
    let ctx = match cli::op::OpContext::new(remote, args.config_path, state.as_ref(), stored) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    let result = args.command.execute(&ctx).await;

    if ctx.client.session_rejected() {
        if let Some(state) = &state {
            if let Err(e) = state.clear_session() {
                tracing::warn!(error = %e, "failed to clear rejected session");
            }
        }
        eprintln!("Session rejected by the server, please log in again");
    }

    // flush buffered log lines before exiting
    drop(guards);

    match result {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

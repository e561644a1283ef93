use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use common::access::AccessController;
use common::session::Session;

use vaultdash::api::client::{ApiClient, ApiError};
use vaultdash::state::{AppConfig, AppState, StateError, StoredSession, DEFAULT_API_URL};
use vaultdash::{HttpBackend, Terminal, TerminalChallenge};

/// Resolve the remote URL for the API client.
///
/// Priority: explicit `--remote` flag > config file `api_url` > hardcoded default.
pub fn resolve_remote(explicit: Option<Url>, state: Option<&AppState>) -> Url {
    if let Some(url) = explicit {
        return url;
    }
    if let Some(url) = state.and_then(|s| s.config.api_url().ok()) {
        return url;
    }
    default_remote()
}

fn default_remote() -> Url {
    Url::parse(DEFAULT_API_URL).expect("hardcoded URL must parse")
}

#[derive(Clone)]
pub struct OpContext {
    /// API client, carrying the session token when logged in
    pub client: ApiClient,
    /// Optional custom config path (defaults to ~/.vaultdash)
    pub config_path: Option<PathBuf>,
    /// Loaded configuration, or defaults before `init`
    pub config: AppConfig,
    /// Shared input for prompts and the shell
    pub terminal: Arc<Terminal>,
    session: Option<Arc<Session>>,
}

impl OpContext {
    /// Create context with custom remote URL and optional config path
    pub fn new(
        remote: Url,
        config_path: Option<PathBuf>,
        state: Option<&AppState>,
        stored: Option<StoredSession>,
    ) -> Result<Self, ApiError> {
        let client = ApiClient::new(&remote)?;
        let (client, session) = match stored {
            Some(stored) => (
                client.with_token(stored.token.clone()),
                Some(Arc::new(Session::begin(stored.user, stored.token))),
            ),
            None => (client, None),
        };

        Ok(Self {
            client,
            config_path,
            config: state.map(|s| s.config.clone()).unwrap_or_default(),
            terminal: Arc::new(Terminal::stdin()),
            session,
        })
    }

    pub fn with_terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = Arc::new(terminal);
        self
    }

    pub fn session(&self) -> Result<&Arc<Session>, NotLoggedIn> {
        self.session.as_ref().ok_or(NotLoggedIn)
    }

    /// Load the state directory, creating it with defaults on first use.
    pub fn state_or_init(&self) -> Result<AppState, StateError> {
        match AppState::load(self.config_path.clone()) {
            Err(StateError::NotInitialized) => {
                let config = AppConfig {
                    api_url: self.client.base_url().to_string(),
                    ..AppConfig::default()
                };
                AppState::init(self.config_path.clone(), Some(config))
            }
            result => result,
        }
    }

    /// An access controller over the logged-in session. Each controller owns
    /// its own challenge slot, so callers that share prompts share one.
    pub fn controller(&self) -> Result<AccessController, NotLoggedIn> {
        let session = self.session()?.clone();
        let backend = Arc::new(HttpBackend::new(self.client.clone()));
        let challenge = Arc::new(TerminalChallenge::new(self.terminal.clone()));

        Ok(
            AccessController::new(session, backend.clone(), backend, challenge)
                .with_fallback(self.config.permission_fallback),
        )
    }
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("not logged in. Run 'vaultdash login' first")]
pub struct NotLoggedIn;

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_remote_explicit_wins() {
        let explicit = Url::parse("http://example.com:9999/api").unwrap();
        let result = resolve_remote(Some(explicit.clone()), None);
        assert_eq!(result, explicit);
    }

    #[test]
    fn test_resolve_remote_uses_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_url: "http://files.internal:8000/api".to_string(),
            ..AppConfig::default()
        };
        let state = AppState::init(Some(dir.path().join("state")), Some(config)).unwrap();

        let result = resolve_remote(None, Some(&state));
        assert_eq!(result.as_str(), "http://files.internal:8000/api");
    }

    #[test]
    fn test_resolve_remote_no_args() {
        let result = resolve_remote(None, None);
        assert_eq!(result.as_str(), "http://localhost:5000/api");
        assert_eq!(result.port().unwrap(), 5000);
    }

    #[test]
    fn test_controller_requires_session() {
        let ctx = OpContext::new(default_remote(), None, None, None).unwrap();
        assert!(ctx.controller().is_err());
        assert!(!ctx.client.has_token());
    }
}

// Library exports for the binary and the integration tests

/// Typed requests for every backend endpoint and the client that sends them
pub mod api;
/// The backend as the access controller's permission and file collaborators
pub mod backend;
pub mod logging;
/// Terminal input and the passcode prompt
pub mod prompt;
/// Plain-text rendering of listings
pub mod render;
/// On-disk configuration and persisted login
pub mod state;

pub use api::client::{ApiClient, ApiError};
pub use backend::HttpBackend;
pub use prompt::{Terminal, TerminalChallenge};
pub use state::{AppConfig, AppState, StateError, StoredSession};

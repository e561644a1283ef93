use std::io::Write;
use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use common::access::PermissionFallback;
use common::session::User;

pub const APP_NAME: &str = "vaultdash";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the dashboard backend API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily rolling log files (stderr only if unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// What to do when the permission lookup for a file fails
    #[serde(default)]
    pub permission_fallback: PermissionFallback,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
            log_dir: None,
            permission_fallback: PermissionFallback::default(),
        }
    }
}

impl AppConfig {
    pub fn api_url(&self) -> Result<Url, StateError> {
        Url::parse(&self.api_url).map_err(|e| StateError::InvalidApiUrl(e.to_string()))
    }

    /// The configured level, falling back to `warn` for anything unparseable.
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}

/// Credentials persisted between invocations after a successful login.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the state directory (~/.vaultdash)
    pub state_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Path to the persisted session
    pub session_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the state directory path (custom or default ~/.vaultdash)
    pub fn state_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let state_dir = Self::state_dir(custom_path)?;

        if state_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&state_dir)?;

        let config = config.unwrap_or_default();
        // refuse to write a config we could not read back
        config.api_url()?;
        let config_path = state_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            session_path: state_dir.join(SESSION_FILE_NAME),
            state_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the state directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let state_dir = Self::state_dir(custom_path)?;

        if !state_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = state_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            session_path: state_dir.join(SESSION_FILE_NAME),
            state_dir,
            config_path,
            config,
        })
    }

    /// The persisted session, if someone is logged in
    pub fn load_session(&self) -> Result<Option<StoredSession>, StateError> {
        if !self.session_path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.session_path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    pub fn save_session(&self, session: &StoredSession) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(session)?;
        write_private(&self.session_path, json.as_bytes())?;
        Ok(())
    }

    /// Remove the persisted session. Returns whether there was one.
    pub fn clear_session(&self) -> Result<bool, StateError> {
        match fs::remove_file(&self.session_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `contents` to a file only the owner can read, including while it
/// is being written.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // mode only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    file.sync_all()
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("vaultdash directory not initialized. Run 'vaultdash init' first")]
    NotInitialized,

    #[error("vaultdash directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("invalid api_url in config: {0}")]
    InvalidApiUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("session file error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    use common::permissions::Role;

    fn stored() -> StoredSession {
        StoredSession {
            token: "tok-123".to_string(),
            user: User {
                id: 7,
                username: "alice".to_string(),
                email: Some("alice@example.com".to_string()),
                role: Role::Admin,
            },
        }
    }

    #[test]
    fn test_init_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");

        let config = AppConfig {
            api_url: "http://files.internal:5000/api".to_string(),
            permission_fallback: PermissionFallback::FailOpen,
            ..AppConfig::default()
        };
        let state = AppState::init(Some(path.clone()), Some(config.clone())).unwrap();
        assert!(state.config_path.exists());

        let loaded = AppState::load(Some(path)).unwrap();
        assert_eq!(loaded.config, config);
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");
        AppState::init(Some(path.clone()), None).unwrap();
        assert!(matches!(
            AppState::init(Some(path), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_init_rejects_bad_api_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        let result = AppState::init(Some(dir.path().join("state")), Some(config));
        assert!(matches!(result, Err(StateError::InvalidApiUrl(_))));
    }

    #[test]
    fn test_load_uninitialized() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppState::load(Some(dir.path().join("missing"))),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join(CONFIG_FILE_NAME), "log_level = \"debug\"\n").unwrap();

        let state = AppState::load(Some(path)).unwrap();
        assert_eq!(state.config.api_url, DEFAULT_API_URL);
        assert_eq!(state.config.log_level(), tracing::Level::DEBUG);
        assert_eq!(state.config.permission_fallback, PermissionFallback::FailClosed);
    }

    #[test]
    fn test_session_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::init(Some(dir.path().join("state")), None).unwrap();

        assert!(state.load_session().unwrap().is_none());
        state.save_session(&stored()).unwrap();

        let loaded = state.load_session().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.user.role, Role::Admin);

        assert!(state.clear_session().unwrap());
        assert!(!state.clear_session().unwrap());
        assert!(state.load_session().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let state = AppState::init(Some(dir.path().join("state")), None).unwrap();
        state.save_session(&stored()).unwrap();

        let mode = fs::metadata(&state.session_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_session_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let state = AppState::init(Some(dir.path().join("state")), None).unwrap();
        fs::write(&state.session_path, "a much longer stale session body than the new one").unwrap();
        fs::set_permissions(&state.session_path, fs::Permissions::from_mode(0o644)).unwrap();

        state.save_session(&stored()).unwrap();

        let mode = fs::metadata(&state.session_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(state.load_session().unwrap().unwrap().token, "tok-123");
    }

    #[test]
    fn test_stored_session_debug_hides_token() {
        let debug = format!("{:?}", stored());
        assert!(!debug.contains("tok-123"));
    }
}

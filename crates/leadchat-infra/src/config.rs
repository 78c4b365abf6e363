//! Configuration loader for leadchat.
//!
//! Reads `config.toml` from the data directory (`~/.leadchat/` by default)
//! or an explicit path, then overlays credentials and conversation texts
//! from the process environment. A `.env` file, when present, is loaded
//! into the environment first; variables already set are left alone.

use std::path::{Path, PathBuf};

use leadchat_types::config::AppConfig;
use leadchat_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LEADCHAT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `LEADCHAT_DATA_DIR` environment variable
/// 2. `~/.leadchat`
/// 3. `.leadchat` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".leadchat");
    }

    PathBuf::from(".leadchat")
}

/// Default location of the config file: `{data_dir}/config.toml`.
pub fn default_config_path() -> PathBuf {
    resolve_data_dir().join("config.toml")
}

/// Load `.env` from the current directory or one of its parents.
///
/// Returns the file that was loaded, or `None` if there is none.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(dotenv_error(Path::new(".env"), err)),
    }
}

/// Load a specific env file into the process environment.
pub fn load_dotenv_file(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path).map_err(|err| dotenv_error(path, err))
}

fn dotenv_error(path: &Path, err: dotenvy::Error) -> ConfigError {
    ConfigError::Read {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Load configuration from a TOML file without environment overrides.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but cannot be read or parsed, returns an error.
pub async fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<AppConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.message().to_string(),
    })
}

/// Load configuration and apply environment overrides.
///
/// Uses `path` when given, otherwise [`default_config_path`].
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let mut config = load_config_file(&path).await?;
    config.apply_env_overrides(|key| std::env::var(key).ok());

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::debug!(missing = ?missing, "credentials not configured");
    }
    Ok(config)
}

//! Configuration file loading for the CLI
//!
//! This module finds and loads the reader configuration TOML file from the
//! explicit path, the workspace directory or the per-user config directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use modeltraits::{ModelTraitsError, config::ReaderConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Invalid reader configuration in {path}: {reason}")]
    Validation { path: PathBuf, reason: String },
}

impl From<ConfigError> for ModelTraitsError {
    fn from(err: ConfigError) -> Self {
        ModelTraitsError::Io(io::Error::other(err.to_string()))
    }
}

/// Where a reader configuration was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigOrigin {
    /// Given with `--config`; it must exist.
    Explicit,
    /// `modeltraits/config.toml` under the working directory.
    Workspace,
    /// The per-user config directory.
    User,
}

/// Find and load the reader configuration
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Workspace directory (modeltraits/config.toml)
/// 3. Per-user config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - A reserved case name is blank
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
) -> Result<ReaderConfig, ModelTraitsError> {
    // 1. An explicit path wins, even when it is missing
    if let Some(path) = explicit_path {
        return load_config_file(path.as_ref(), ConfigOrigin::Explicit);
    }

    // 2. and 3. The first existing candidate is used
    let candidates = [
        Some((PathBuf::from("modeltraits/config.toml"), ConfigOrigin::Workspace)),
        user_config_path().map(|path| (path, ConfigOrigin::User)),
    ];
    for (path, origin) in candidates.into_iter().flatten() {
        if path.exists() {
            return load_config_file(&path, origin);
        }
        debug!(path = path.display().to_string(), origin:?; "No reader configuration here");
    }

    // 4. Defaults reserve the meshing case and keep literal matrices
    debug!("No configuration file found, using default configuration");
    Ok(ReaderConfig::default())
}

fn user_config_path() -> Option<PathBuf> {
    let Some(dirs) = ProjectDirs::from("com", "modeltraits", "modeltraits") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    Some(dirs.config_dir().join("config.toml"))
}

fn load_config_file(path: &Path, origin: ConfigOrigin) -> Result<ReaderConfig, ModelTraitsError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }
    info!(path = path.display().to_string(), origin:?; "Loading reader configuration");

    let content = fs::read_to_string(path)?;
    let config: ReaderConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if config.cases().reserved().iter().any(|name| name.trim().is_empty()) {
        return Err(ConfigError::Validation {
            path: path.to_path_buf(),
            reason: "reserved case names must not be blank".to_string(),
        }
        .into());
    }

    debug!(
        reserved:? = config.cases().reserved(),
        literal_matrix_with_function = config.values().literal_matrix_with_function();
        "Reader configuration loaded"
    );
    Ok(config)
}

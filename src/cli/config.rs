use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::auth::{FileCredentialStore, Session};
use crate::config;
use crate::error::ConsoleError;
use crate::routing::RouteTable;

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Some(custom_dir) = &config::config().storage.config_dir {
        custom_dir.clone()
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("rentline")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn credentials_path() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join(&config::config().storage.credentials_file))
}

/// Session backed by the credentials file in the config directory
pub fn open_session() -> anyhow::Result<Session<FileCredentialStore>> {
    let path = credentials_path()?;
    tracing::debug!("Using credentials file {}", path.display());
    Ok(Session::new(FileCredentialStore::new(path)))
}

/// Read a JSON array of records
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ConsoleError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConsoleError::invalid_records(format!("Cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| ConsoleError::invalid_records(format!("Invalid records in {}: {}", path.display(), e)))
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConsoleError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConsoleError::invalid_input(format!("Cannot read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}

/// The built-in route table, or one loaded from a YAML file
pub fn load_route_table(path: Option<&Path>) -> Result<RouteTable, ConsoleError> {
    match path {
        None => Ok(RouteTable::default()),
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| ConsoleError::invalid_input(format!("Cannot read {}: {}", path.display(), e)))?;
            Ok(RouteTable::from_yaml(&content)?)
        }
    }
}

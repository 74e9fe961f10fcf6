//! Application state management

use std::path::PathBuf;

use directories::ProjectDirs;
use sublet_core::{ChatConfig, ChatService, Error, Listing, Result};

use crate::sample;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "SUBLET_CONFIG";

/// Main application state
pub struct AppState {
    pub service: ChatService,
    /// Hardcoded listing catalog
    pub listings: Vec<Listing>,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let config_path = Self::config_path()?;
        let config = ChatConfig::load_or_default(&config_path)?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: ChatConfig) -> Self {
        Self {
            service: ChatService::new(config),
            listings: sample::listings(),
        }
    }

    fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("dev", "sublet", "sublet").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        Ok(dirs.config_dir().join("sublet.toml"))
    }
}

//! Chat configuration loaded from TOML
//!
//! ```toml
//! prevent_duplicate_chats = true
//!
//! [current_user]
//! id = "user-42"
//! name = "Dana"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Participant, UserId, CURRENT_USER_ID};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// The local user; stands in whenever an initiating user is omitted
    pub current_user: CurrentUserConfig,
    /// Reuse an existing chat when opening an inquiry on the same listing
    pub prevent_duplicate_chats: bool,
    /// Count counterpart messages as unread
    pub track_unread: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            current_user: CurrentUserConfig::default(),
            prevent_duplicate_chats: false,
            track_unread: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentUserConfig {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

impl Default for CurrentUserConfig {
    fn default() -> Self {
        Self {
            id: CURRENT_USER_ID.to_string(),
            name: "You".to_string(),
            avatar: None,
        }
    }
}

impl ChatConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, falling back to defaults if the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        tracing::info!(path = %path.display(), "Loaded chat config");
        Ok(config)
    }

    pub fn current_user_id(&self) -> UserId {
        UserId::new(self.current_user.id.clone())
    }

    /// The local user as a chat participant
    pub fn current_participant(&self) -> Participant {
        Participant {
            id: self.current_user_id(),
            name: self.current_user.name.clone(),
            avatar: self.current_user.avatar.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.current_user_id(), UserId::current_user());
        assert_eq!(config.current_participant().name, "You");
        assert!(!config.prevent_duplicate_chats);
        assert!(config.track_unread);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChatConfig::from_toml_str(
            r#"
prevent_duplicate_chats = true

[current_user]
name = "Dana"
"#,
        )
        .unwrap();

        assert!(config.prevent_duplicate_chats);
        assert!(config.track_unread);
        assert_eq!(config.current_user.name, "Dana");
        assert_eq!(config.current_user.id, CURRENT_USER_ID);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sublet.toml");
        fs::write(&path, "track_unread = false\n[current_user]\nid = \"U2\"\n").unwrap();

        let config = ChatConfig::load(&path).unwrap();
        assert!(!config.track_unread);
        assert_eq!(config.current_user_id(), UserId::new("U2"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = ChatConfig::load_or_default(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = ChatConfig::from_toml_str("prevent_duplicate_chats = \"maybe\"");
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}

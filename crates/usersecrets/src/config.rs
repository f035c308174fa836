//! usersecrets configuration
//!
//! Read from ~/.config/usersecrets/config.yaml. Every field is optional
//! and a missing file means defaults. Command-line flags win over the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use usersecrets_core::Paths;

use crate::error::{Result, UserSecretsError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSecretsConfig {
    /// Fail when a project file has nowhere to put the UserSecretsId
    pub strict: bool,

    /// Open the secrets file in an editor after locating it
    pub open_in_editor: bool,

    /// Editor command, overriding $VISUAL and $EDITOR
    pub editor: Option<String>,
}

impl UserSecretsConfig {
    /// Load configuration from the default location
    pub fn load(paths: &Paths) -> Result<Self> {
        Self::load_from(&paths.config_file())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| UserSecretsError::io(path, e))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| UserSecretsError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Editor command to launch, if any is configured or set in the environment
    pub fn editor_command(&self) -> Option<String> {
        first_command([
            self.editor.clone(),
            std::env::var("VISUAL").ok(),
            std::env::var("EDITOR").ok(),
        ])
    }
}

/// First candidate that is set to something other than whitespace
fn first_command(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|cmd| !cmd.trim().is_empty())
}

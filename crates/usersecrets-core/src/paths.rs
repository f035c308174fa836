//! Standard per-user paths used by usersecrets

use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathsError {
    #[error("Could not determine the home directory")]
    NoHome,
}

/// Per-user directories the tool reads from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Home directory (~)
    pub home: PathBuf,
    /// Roaming application data root (%APPDATA%), if set
    pub roaming_app_data: Option<PathBuf>,
    /// Config directory (~/.config/usersecrets)
    pub config: PathBuf,
}

impl Paths {
    /// Read the paths of the current user from the process environment
    pub fn from_env() -> Result<Self, PathsError> {
        let home = dirs::home_dir().ok_or(PathsError::NoHome)?;

        let config = dirs::config_dir()
            .unwrap_or_else(|| home.join(".config"))
            .join("usersecrets");

        Ok(Self {
            roaming_app_data: non_empty(std::env::var_os("APPDATA")),
            home,
            config,
        })
    }

    /// Paths rooted at an explicit home directory, with no roaming root
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let config = home.join(".config").join("usersecrets");
        Self {
            home,
            roaming_app_data: None,
            config,
        }
    }

    pub fn with_roaming_app_data(mut self, root: impl Into<PathBuf>) -> Self {
        self.roaming_app_data = Some(root.into());
        self
    }

    /// Roaming application data root, falling back to ~/AppData/Roaming
    pub fn roaming_root(&self) -> PathBuf {
        self.roaming_app_data
            .clone()
            .unwrap_or_else(|| self.home.join("AppData").join("Roaming"))
    }

    /// Default location of the config file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.yaml")
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

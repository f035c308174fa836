//! The UserSecretsId token

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use usersecrets_core::Platform;
use uuid::Uuid;

use crate::error::{Result, UserSecretsError};

/// Names one project's secrets store.
///
/// Canonically a GUID, but values read from a project file are kept
/// verbatim: no trimming, no format check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretsId(String);

impl SecretsId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mint a fresh random (v4) identifier
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the id can be used as exactly one path segment on
    /// `platform`.
    ///
    /// The id becomes a directory name, so separators, drive prefixes and
    /// `..` would let a project file point the store anywhere on disk.
    /// `\` and `:` are only separators on Windows.
    pub fn validate_segment(&self, platform: Platform) -> Result<()> {
        let id = self.0.as_str();

        let mut components = Path::new(id).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        let separator = if platform.is_windows() {
            id.contains(['/', '\\', ':', '\0'])
        } else {
            id.contains(['/', '\0'])
        };

        if !single_normal || separator || id == "." || id == ".." {
            return Err(UserSecretsError::InvalidIdentifier(id.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for SecretsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

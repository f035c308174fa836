//! Secrets store location
//!
//! Follows the layout the dotnet CLI and Visual Studio read from:
//! - Windows: %APPDATA%\Microsoft\UserSecrets\<id>\secrets.json
//! - everything else: ~/.microsoft/usersecrets/<id>/secrets.json

use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use usersecrets_core::{Paths, Platform};

use crate::error::{Result, UserSecretsError};
use crate::identifier::SecretsId;

pub const SECRETS_FILE_NAME: &str = "secrets.json";

/// Content of a freshly created secrets file: an empty object with a
/// blank line for the cursor.
pub const PLACEHOLDER: &str = "{\n  \n}";

/// A secrets file that exists on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretsFile {
    pub path: PathBuf,
    /// Created on this call rather than found
    pub created: bool,
}

/// Maps identifiers to secrets files for one platform
#[derive(Debug, Clone)]
pub struct SecretsLocator {
    platform: Platform,
    paths: Paths,
}

impl SecretsLocator {
    pub fn new(platform: Platform, paths: Paths) -> Self {
        Self { platform, paths }
    }

    /// Locator for a platform given by name (`win32`, `darwin`, `linux`, ...)
    pub fn for_platform(name: &str, paths: Paths) -> Result<Self> {
        Ok(Self::new(name.parse()?, paths))
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Directory holding the store for `id`
    pub fn directory(&self, id: &SecretsId) -> Result<PathBuf> {
        id.validate_segment(self.platform)?;

        let dir = if self.platform.is_windows() {
            self.paths
                .roaming_root()
                .join("Microsoft")
                .join("UserSecrets")
                .join(id.as_str())
        } else {
            self.paths
                .home
                .join(".microsoft")
                .join("usersecrets")
                .join(id.as_str())
        };

        debug!("Secrets directory for {} on {}: {}", id, self.platform, dir.display());
        Ok(dir)
    }

    /// Path of the secrets file for `id`, without touching the disk
    pub fn file_path(&self, id: &SecretsId) -> Result<PathBuf> {
        Ok(self.directory(id)?.join(SECRETS_FILE_NAME))
    }

    /// Make sure the directory and secrets file exist.
    ///
    /// An existing file is never written to.
    pub fn ensure(&self, id: &SecretsId) -> Result<SecretsFile> {
        let dir = self.directory(id)?;
        fs::create_dir_all(&dir).map_err(|e| UserSecretsError::io(&dir, e))?;

        let path = dir.join(SECRETS_FILE_NAME);
        let created = create_placeholder(&path)?;
        if created {
            info!("Created secrets file {}", path.display());
        }

        Ok(SecretsFile { path, created })
    }

    /// Path of an existing (possibly just created) secrets file
    pub fn locate(&self, id: &SecretsId) -> Result<PathBuf> {
        Ok(self.ensure(id)?.path)
    }
}

/// Write the placeholder unless something is already there.
/// Returns whether the file was created.
fn create_placeholder(path: &Path) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(UserSecretsError::io(path, e)),
    };

    file.write_all(PLACEHOLDER.as_bytes())
        .map_err(|e| UserSecretsError::io(path, e))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn locator(platform: &str, paths: Paths) -> SecretsLocator {
        SecretsLocator::new(platform.parse().unwrap(), paths)
    }

    #[test]
    fn test_windows_path() {
        let paths = Paths::with_home("/home/dev").with_roaming_app_data("/appdata");
        let id = SecretsId::new("abc");

        let path = locator("win32", paths).file_path(&id).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/appdata/Microsoft/UserSecrets/abc/secrets.json")
        );
    }

    #[test]
    fn test_windows_path_without_app_data() {
        let id = SecretsId::new("abc");
        let path = locator("win32", Paths::with_home("/home/dev"))
            .file_path(&id)
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/dev/AppData/Roaming/Microsoft/UserSecrets/abc/secrets.json")
        );
    }

    #[test]
    fn test_unix_paths() {
        let id = SecretsId::new("abc");
        let expected = PathBuf::from("/home/dev/.microsoft/usersecrets/abc/secrets.json");

        for platform in ["linux", "darwin", "freebsd"] {
            // APPDATA is ignored off Windows
            let paths = Paths::with_home("/home/dev").with_roaming_app_data("/appdata");
            assert_eq!(locator(platform, paths).file_path(&id).unwrap(), expected);
        }
    }

    #[test]
    fn test_unknown_platform_name() {
        let err = SecretsLocator::for_platform("plan9", Paths::with_home("/home/dev")).unwrap_err();
        assert!(matches!(err, UserSecretsError::Platform(_)));
    }

    #[test]
    fn test_paths_are_deterministic() {
        let paths = Paths::with_home("/home/dev");
        let id = SecretsId::mint();
        let loc = locator("linux", paths);
        assert_eq!(loc.file_path(&id).unwrap(), loc.file_path(&id).unwrap());
    }

    #[test]
    fn test_ensure_creates_placeholder() {
        let temp = tempdir().unwrap();
        let loc = locator("linux", Paths::with_home(temp.path()));
        let id = SecretsId::mint();

        let file = loc.ensure(&id).unwrap();
        assert!(file.created);
        assert!(file.path.starts_with(temp.path()));
        assert_eq!(fs::read_to_string(&file.path).unwrap(), "{\n  \n}");
    }

    #[test]
    fn test_ensure_keeps_existing_content() {
        let temp = tempdir().unwrap();
        let loc = locator("darwin", Paths::with_home(temp.path()));
        let id = SecretsId::new("keep-me");

        let dir = loc.directory(&id).unwrap();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SECRETS_FILE_NAME), r#"{"Key":"Value"}"#).unwrap();

        let file = loc.ensure(&id).unwrap();
        assert!(!file.created);
        assert_eq!(fs::read_to_string(&file.path).unwrap(), r#"{"Key":"Value"}"#);

        // And again
        assert_eq!(loc.locate(&id).unwrap(), file.path);
        assert_eq!(fs::read_to_string(&file.path).unwrap(), r#"{"Key":"Value"}"#);
    }

    #[test]
    fn test_ensure_twice() {
        let temp = tempdir().unwrap();
        let loc = locator("win32", Paths::with_home(temp.path()).with_roaming_app_data(temp.path()));
        let id = SecretsId::mint();

        let first = loc.ensure(&id).unwrap();
        let second = loc.ensure(&id).unwrap();
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.path, second.path);
        assert_eq!(
            first.path,
            temp.path()
                .join("Microsoft")
                .join("UserSecrets")
                .join(id.as_str())
                .join("secrets.json")
        );
    }

    #[test]
    fn test_traversal_rejected() {
        let temp = tempdir().unwrap();
        let loc = locator("linux", Paths::with_home(temp.path()));

        let err = loc.ensure(&SecretsId::new("../../etc")).unwrap_err();
        assert!(matches!(err, UserSecretsError::InvalidIdentifier(_)));
        assert!(!temp.path().join(".microsoft").exists());
    }

    #[test]
    fn test_drive_prefix_rejected_on_windows() {
        let paths = Paths::with_home("/home/dev").with_roaming_app_data("/appdata");
        let err = locator("win32", paths)
            .file_path(&SecretsId::new("C:evil"))
            .unwrap_err();
        assert!(matches!(err, UserSecretsError::InvalidIdentifier(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_stays_inside_store_on_unix() {
        let path = locator("linux", Paths::with_home("/home/dev"))
            .file_path(&SecretsId::new("a\\b"))
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/dev/.microsoft/usersecrets/a\\b/secrets.json")
        );
    }

    #[test]
    fn test_unwritable_location() {
        let temp = tempdir().unwrap();
        // A file where the home directory should be
        let home = temp.path().join("home");
        fs::write(&home, "").unwrap();

        let loc = locator("linux", Paths::with_home(&home));
        let err = loc.ensure(&SecretsId::mint()).unwrap_err();
        assert!(matches!(err, UserSecretsError::Io { .. }));
    }
}

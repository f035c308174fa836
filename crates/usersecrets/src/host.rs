//! The side of the tool that faces the user
//!
//! Resolution and location only produce paths. Showing the file and
//! telling the user what happened is up to whoever triggered the action:
//! an editor integration, a test, or the terminal.

use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{Result, UserSecretsError};

pub trait Host {
    /// Present the secrets file for editing
    fn open(&mut self, path: &Path) -> Result<()>;

    /// Report something that went well
    fn info(&mut self, message: &str);

    /// Report a failure
    fn error(&mut self, message: &str);
}

/// Prints to the terminal and optionally launches an editor
#[derive(Debug, Clone, Default)]
pub struct TerminalHost {
    /// Editor command line, e.g. "code --wait"
    editor: Option<String>,
    /// Keep stdout clean for machine-readable output
    quiet: bool,
}

impl TerminalHost {
    pub fn new(editor: Option<String>) -> Self {
        Self {
            editor,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Host for TerminalHost {
    fn open(&mut self, path: &Path) -> Result<()> {
        let Some(editor) = self.editor.as_deref() else {
            if !self.quiet {
                println!("{}", path.display());
            }
            return Ok(());
        };

        let mut parts = editor.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };

        debug!("Launching editor: {} {}", editor, path.display());
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|e| UserSecretsError::io(path, e))?;

        if !status.success() {
            return Err(UserSecretsError::io(
                path,
                std::io::Error::other(format!("editor '{}' exited with {}", editor, status)),
            ));
        }

        Ok(())
    }

    fn info(&mut self, message: &str) {
        if self.quiet {
            eprintln!("info: {}", message);
        } else {
            println!("info: {}", message);
        }
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_without_editor_succeeds() {
        let temp = tempdir().unwrap();
        let mut host = TerminalHost::default().quiet(true);
        assert!(host.open(&temp.path().join("secrets.json")).is_ok());
    }

    #[test]
    fn test_open_with_missing_editor_fails() {
        let temp = tempdir().unwrap();
        let mut host = TerminalHost::new(Some("usersecrets-no-such-editor-binary".to_string()));
        let err = host.open(&temp.path().join("secrets.json")).unwrap_err();
        assert!(matches!(err, UserSecretsError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_runs_editor_with_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("secrets.json");
        std::fs::write(&path, "{}").unwrap();

        // `test -f <path>` exits 0 only if it received the file
        let mut host = TerminalHost::new(Some("test -f".to_string()));
        assert!(host.open(&path).is_ok());

        let mut host = TerminalHost::new(Some("test -d".to_string()));
        assert!(host.open(&path).is_err());
    }
}

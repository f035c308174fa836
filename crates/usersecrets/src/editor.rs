//! The "edit secrets" action
//!
//! project file -> UserSecretsId (read or mint) -> secrets file (found or
//! created) -> handed to the host for editing.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::descriptor;
use crate::error::Result;
use crate::host::Host;
use crate::identifier::SecretsId;
use crate::resolver::IdentifierResolver;
use crate::store::SecretsLocator;

/// Everything one run found out or changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretsReport {
    pub descriptor: PathBuf,
    pub user_secrets_id: SecretsId,
    pub minted: bool,
    pub persisted: bool,
    pub secrets_file: PathBuf,
    pub created: bool,
}

pub struct SecretsEditor {
    resolver: IdentifierResolver,
    locator: SecretsLocator,
}

impl SecretsEditor {
    pub fn new(resolver: IdentifierResolver, locator: SecretsLocator) -> Self {
        Self { resolver, locator }
    }

    /// Resolve the project's id and make sure its secrets file exists.
    ///
    /// `project` may be a project file or a directory holding exactly one.
    pub fn find_or_create(&self, project: &Path) -> Result<SecretsReport> {
        let descriptor = descriptor::discover(project)?;
        debug!("Processing project file {}", descriptor.display());

        let resolution = self.resolver.resolve(&descriptor)?;
        let file = self.locator.ensure(&resolution.id)?;

        Ok(SecretsReport {
            descriptor: resolution.descriptor,
            user_secrets_id: resolution.id,
            minted: resolution.minted,
            persisted: resolution.persisted,
            secrets_file: file.path,
            created: file.created,
        })
    }

    /// Run the whole action against a host.
    ///
    /// Failures are logged and reported to the host as a single message;
    /// the caller only learns whether it worked.
    pub fn edit(&self, project: &Path, host: &mut dyn Host) -> Option<SecretsReport> {
        let report = match self.find_or_create(project) {
            Ok(report) => report,
            Err(e) => {
                error!("Error finding or creating secrets file: {}", e);
                host.error("Could not find or create secrets file for this project.");
                return None;
            }
        };

        if report.minted && report.persisted {
            host.info("Added UserSecretsId to project file.");
        }

        if let Err(e) = host.open(&report.secrets_file) {
            error!("Error opening {}: {}", report.secrets_file.display(), e);
            host.error(&format!("Error opening secrets file: {}", e));
            return None;
        }

        let name = report
            .secrets_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        host.info(&format!("Opened secrets file: {}", name));

        Some(report)
    }
}
